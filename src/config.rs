//! Configuração do catwatch carregada a partir de `catwatch.toml`.
//!
//! A struct [`CatwatchConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `CATWATCH_TOKEN` e `CATWATCH_API_URL` têm
//! precedência sobre o arquivo.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::api::Timeouts;
use crate::error::CatwatchError;
use crate::poller::PollSettings;

/// Configuração de nível superior carregada de `catwatch.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatwatchConfig {
    /// URL raiz da API (onde fica `job/`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// URL pública dos resultados. Se ausente, `{api_url}static/`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Token de sessão para iniciar e desbloquear jobs.
    #[serde(default)]
    pub token: String,

    /// Intervalo entre consultas de estado, em milissegundos.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Tempo máximo para estabelecer a conexão, em segundos.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Tempo máximo de cada requisição, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Arquivo opcional que recebe uma cópia do log.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

// Valor padrão da API: servidor de desenvolvimento local.
fn default_api_url() -> String {
    "http://127.0.0.1:5001/".to_string()
}

// Valor padrão do intervalo de polling: 500ms.
fn default_poll_interval_ms() -> u64 {
    500
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for CatwatchConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            base_url: None,
            token: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_file: None,
        }
    }
}

impl CatwatchConfig {
    /// Carrega a configuração de `catwatch.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("catwatch.toml"))
    }

    /// Carrega a configuração de um caminho explícito.
    ///
    /// Não valida: as opções da linha de comando ainda podem sobrescrever
    /// os valores, e [`validate`](Self::validate) roda depois delas.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<CatwatchConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variáveis de ambiente têm precedência sobre o arquivo de configuração.
        if let Ok(token) = std::env::var("CATWATCH_TOKEN")
            && !token.is_empty()
        {
            config.token = token;
        }
        if let Ok(url) = std::env::var("CATWATCH_API_URL")
            && !url.is_empty()
        {
            config.api_url = url;
        }

        Ok(config)
    }

    /// Aplica as opções `--api-url` e `--interval-ms`, que têm precedência
    /// sobre o arquivo e as variáveis de ambiente.
    pub fn apply_overrides(&mut self, api_url: Option<String>, interval_ms: Option<u64>) {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(ms) = interval_ms {
            self.poll_interval_ms = ms;
        }
    }

    /// Rejeita valores que tornariam o polling inutilizável.
    pub fn validate(&self) -> Result<(), CatwatchError> {
        if self.poll_interval_ms == 0 {
            return Err(CatwatchError::Config(
                "poll_interval_ms must be greater than zero".into(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(CatwatchError::Config(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    /// URL dos resultados publicados.
    pub fn results_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("{}/static/", self.api_url.trim_end_matches('/')),
        }
    }

    pub fn token(&self) -> Option<String> {
        (!self.token.is_empty()).then(|| self.token.clone())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
