//! Tipos de erro para o cliente da API de jobs.
//!
//! Define [`ApiError`] com variantes para falhas de rede, respostas HTTP de
//! erro e respostas mal formadas. Todas encerram a sessão de polling atual;
//! nenhuma é retentada automaticamente.

use thiserror::Error;

/// Erros que podem ocorrer ao falar com o endpoint `job/`.
///
/// - [`Rejected`](ApiError::Rejected): o servidor respondeu com status 4xx/5xx
/// - [`Protocol`](ApiError::Protocol): corpo 2xx que não é um registro de estado válido
/// - [`Network`](ApiError::Network): falha na camada de rede
/// - [`Unauthenticated`](ApiError::Unauthenticated): ação autenticada sem token configurado
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resposta HTTP de erro. `message` vem do campo `message` do corpo JSON
    /// quando existe; senão é o texto bruto do corpo.
    #[error("job API rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Corpo com campos ausentes ou estado desconhecido.
    #[error("malformed status record: {0}")]
    Protocol(String),

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Início e desbloqueio exigem um token de sessão.
    #[error("no session token configured; set CATWATCH_TOKEN or `token` in catwatch.toml")]
    Unauthenticated,
}

impl ApiError {
    /// Texto que deve aparecer na área de mensagens do usuário.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display() {
        let err = ApiError::Rejected {
            status: 409,
            message: "Procesando...".into(),
        };
        assert_eq!(
            err.to_string(),
            "job API rejected the request (status 409): Procesando..."
        );
        assert_eq!(err.user_message(), "Procesando...");
    }

    #[test]
    fn protocol_display() {
        let err = ApiError::Protocol("missing field `linea`".into());
        assert_eq!(err.to_string(), "malformed status record: missing field `linea`");
        assert_eq!(err.user_message(), err.to_string());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
