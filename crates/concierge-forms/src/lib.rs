//! Form-submission pipeline for the site's contact and student-program
//! flows.
//!
//! Both forms share one shape: field validation first, then reCAPTCHA v3
//! verification, then the (simulated) submission side effect. Exactly one
//! of {field errors, verification error, success} comes back per
//! submission. A missing or failed-to-issue token never blocks the
//! submission — it is flagged for manual review instead.

pub mod contact;
pub mod outcome;
pub mod recaptcha;
pub mod student;
mod pipeline;
mod validate;

pub use contact::{ContactForm, ContactSubmission};
pub use outcome::{FormOutcome, Review};
pub use recaptcha::{CaptchaVerifier, RecaptchaClient, Verification};
pub use student::{StudentApplication, StudentProgramForm};
