pub mod error;
pub mod storage;
pub mod types;
pub mod upload;
pub mod verifier;

pub use error::{Error, Result, VerifyError};
pub use storage::PreferenceStore;
pub use types::{
    BackendStatus, HealthReport, ImageVerification, Service, SubScores, TextVerification, Theme,
    Verdict,
};
pub use upload::{DataUrl, SelectedFile};
pub use verifier::{Verifier, VerifyResult};

pub mod prelude {
    pub use crate::{Error, PreferenceStore, Result, Verifier, VerifyError};
}
