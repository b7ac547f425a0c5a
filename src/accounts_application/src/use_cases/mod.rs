mod notify;

pub mod change_password;
pub mod confirm_account;
pub mod forgot_password;
pub mod get_account;
pub mod rating;
pub mod register;
pub mod resend_confirmation;
pub mod reset_password;
pub mod resolve_bearer_subject;
pub mod toggle_active;
pub mod update_info;

pub use change_password::ChangePasswordUseCase;
pub use confirm_account::ConfirmAccountUseCase;
pub use forgot_password::ForgotPasswordUseCase;
pub use get_account::GetAccountUseCase;
pub use rating::{GetRatingUseCase, UpdateRatingUseCase};
pub use register::RegisterUseCase;
pub use resend_confirmation::ResendConfirmationUseCase;
pub use reset_password::ResetPasswordUseCase;
pub use resolve_bearer_subject::ResolveBearerSubjectUseCase;
pub use toggle_active::ToggleActiveUseCase;
pub use update_info::UpdateInfoUseCase;
