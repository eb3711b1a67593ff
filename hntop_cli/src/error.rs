use hntop_core::Error as CoreError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub struct CliError(anyhow::Error);

impl<E> From<E> for CliError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CliError {
    /// Process exit code: 2 for configuration problems, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        for cause in self.0.chain() {
            if let Some(err) = cause.downcast_ref::<CoreError>() {
                match err {
                    CoreError::ConfigError { .. } => return 2,
                    _ => return 1,
                }
            }
        }
        1
    }

    pub fn is_network(&self) -> bool {
        use hackernews_client::Error as ClientError;
        self.0.chain().any(|cause| match cause.downcast_ref::<CoreError>() {
            Some(CoreError::Client(ClientError::NetworkError(_))) | Some(CoreError::Timeout(_)) => true,
            _ => matches!(cause.downcast_ref::<ClientError>(), Some(ClientError::NetworkError(_))),
        })
    }
}
