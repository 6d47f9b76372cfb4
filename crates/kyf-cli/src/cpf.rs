use kyf_core::{mask_cpf, Cpf, CoreError};

pub(crate) fn run_mask(input: &str) -> String {
    mask_cpf(input)
}

/// Returns the bare digits of a valid CPF.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCpf`] when the input does not reduce to
/// exactly eleven digits.
pub(crate) fn run_check(input: &str) -> Result<String, CoreError> {
    Cpf::parse(input).map(|cpf| cpf.as_str().to_owned())
}
