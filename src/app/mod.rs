// Application layer - Use case interactors

pub mod container;
pub mod preview_interactor;
pub mod selection_interactor;
pub mod transition_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer, PortSet};
pub use preview_interactor::{PreviewInteractor, PreviewSettings};
pub use selection_interactor::{
    SelectionEvent, SelectionInteractor, SelectionOutcome, SelectionSettings,
};
pub use transition_interactor::{TransitionInteractor, TransitionRequest, TransitionResponse};
