pub mod coordinator;
pub mod form;

pub use coordinator::{Crud, CrudApi, DeleteOutcome, Ids, ModalState, OpenMode, SaveOutcome};
pub use form::{FieldError, FormRules};
