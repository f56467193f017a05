//! Interface de linha de comando do catwatch baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (watch, start,
//! unlock, links) e flags globais (--api-url, --interval-ms, --verbose).

use clap::{Args, Parser, Subcommand};

use crate::error::CatwatchError;
use crate::monitor::JobId;

/// catwatch: acompanha os jobs de importação de edifícios e endereços.
#[derive(Debug, Parser)]
#[command(name = "catwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL raiz da API; substitui o arquivo de configuração e o ambiente.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Intervalo entre consultas de estado, em milissegundos.
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Município e divisão opcional que identificam o job.
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Código INE do município (cinco dígitos).
    pub municipality: String,

    /// Divisão (distrito/bairro) dentro do município.
    #[arg(long, short)]
    pub division: Option<String>,
}

impl Target {
    /// Valida os códigos e monta o identificador do job.
    pub fn job_id(&self) -> Result<JobId, CatwatchError> {
        JobId::new(&self.municipality, self.division.as_deref())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Acompanha o job de um município até ele terminar.
    Watch {
        #[command(flatten)]
        target: Target,
    },

    /// Inicia a importação e acompanha o progresso.
    Start {
        #[command(flatten)]
        target: Target,

        /// Não importar edifícios.
        #[arg(long, default_value_t = false)]
        no_building: bool,

        /// Não importar endereços.
        #[arg(long, default_value_t = false)]
        no_address: bool,

        /// Idioma da importação; por padrão depende da província.
        #[arg(long)]
        idioma: Option<String>,
    },

    /// Desbloqueia um job pendente de revisão e volta a acompanhá-lo.
    Unlock {
        #[command(flatten)]
        target: Target,
    },

    /// Mostra os links de download e revisão de um município.
    Links {
        #[command(flatten)]
        target: Target,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_watch_subcommand() {
        let cli = Cli::parse_from(["catwatch", "watch", "28079"]);
        match cli.command {
            Command::Watch { target } => {
                assert_eq!(target.municipality, "28079");
                assert!(target.division.is_none());
            }
            _ => panic!("expected Watch command"),
        }
    }

    #[test]
    fn cli_parses_start_options() {
        let cli = Cli::parse_from([
            "catwatch",
            "start",
            "08019",
            "--division",
            "3471245",
            "--no-address",
            "--idioma",
            "es_ES",
        ]);
        match cli.command {
            Command::Start {
                target,
                no_building,
                no_address,
                idioma,
            } => {
                assert_eq!(target.municipality, "08019");
                assert_eq!(target.division.as_deref(), Some("3471245"));
                assert!(!no_building);
                assert!(no_address);
                assert_eq!(idioma.as_deref(), Some("es_ES"));
            }
            _ => panic!("expected Start command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "catwatch",
            "--api-url",
            "http://localhost:5001/",
            "--interval-ms",
            "250",
            "--verbose",
            "unlock",
            "28079",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5001/"));
        assert_eq!(cli.interval_ms, Some(250));
        assert!(matches!(cli.command, Command::Unlock { .. }));
    }

    #[test]
    fn target_validates_municipality() {
        let cli = Cli::parse_from(["catwatch", "links", "2807"]);
        match cli.command {
            Command::Links { target } => assert!(target.job_id().is_err()),
            _ => panic!("expected Links command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
