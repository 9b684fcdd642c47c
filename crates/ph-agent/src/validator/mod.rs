pub mod check_result;
pub mod validation_report;
pub mod validator;
