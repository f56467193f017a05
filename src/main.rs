mod api;
mod cli;
mod config;
mod error;
mod links;
mod logging;
mod monitor;
mod poller;
mod ui;
mod view;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use log::{info, warn};

use api::{JobClient, StartRequest};
use cli::{Cli, Command};
use config::CatwatchConfig;
use links::ResultLinks;
use poller::{Poller, SessionEnd};
use ui::TerminalPresenter;

/// What to do with the job before following it.
enum Action {
    Watch,
    Start(StartRequest),
    Unlock,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CatwatchConfig::load()?;
    config.apply_overrides(cli.api_url, cli.interval_ms);
    config.validate()?;
    logging::initialize(cli.verbose, config.log_file.as_deref());

    let links = ResultLinks::new(&config.results_base_url());

    let (target, action) = match cli.command {
        Command::Links { target } => {
            let job_id = target.job_id()?;
            println!("descargar: {}", links.download(&job_id));
            println!("revisar:   {}", links.street_names(&job_id));
            return Ok(());
        }
        Command::Watch { target } => (target, Action::Watch),
        Command::Unlock { target } => (target, Action::Unlock),
        Command::Start {
            target,
            no_building,
            no_address,
            idioma,
        } => {
            let job_id = target.job_id()?;
            let req = StartRequest {
                building: !no_building,
                address: !no_address,
                idioma: idioma.unwrap_or_else(|| job_id.default_language().to_string()),
            };
            (target, Action::Start(req))
        }
    };
    let job_id = target.job_id()?;

    let client = JobClient::with_api_url(config.api_url.clone(), config.token(), config.timeouts())?;
    let mut poller = Poller::new(client, config.poll_settings());
    let switch = poller.switch();
    let mut presenter = TerminalPresenter::start(&job_id, links);
    info!("monitoring job {job_id} via {}", config.api_url);

    let session = async {
        match action {
            Action::Watch => Ok(poller.watch(job_id, &mut presenter).await),
            Action::Start(req) => poller.start_job(job_id, &req, &mut presenter).await,
            Action::Unlock => poller.unlock_job(job_id, &mut presenter).await,
        }
    };

    let end = tokio::select! {
        end = session => end?,
        _ = tokio::signal::ctrl_c() => {
            switch.supersede();
            warn!("interrupted; monitoring stopped");
            SessionEnd::Superseded
        }
    };

    if matches!(end, SessionEnd::Superseded) {
        presenter.interrupted();
    }

    if let Some(session) = poller.session() {
        let elapsed = Utc::now() - session.started_at;
        info!(
            "session {} for {} ended after {} polls in {}s",
            session.generation,
            session.job_id,
            session.ticks,
            elapsed.num_seconds()
        );
    }

    match end {
        SessionEnd::Failed(err) => Err(err.into()),
        SessionEnd::Settled(state) => {
            info!("job settled in {state}");
            Ok(())
        }
        SessionEnd::Idle | SessionEnd::Superseded => Ok(()),
    }
}
