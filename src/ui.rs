//! Interface de terminal do catwatch: spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o indicador de carregamento e `console`
//! para estilização com cores. O [`TerminalPresenter`] recebe as
//! atualizações do poller e as imprime no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::ApiError;
use crate::links::ResultLinks;
use crate::monitor::{Affordances, JobId, JobState};
use crate::view::{PollUpdate, Presenter, TerminalView};

/// Apresentação de um job no terminal.
///
/// O spinner faz o papel do indicador de carregamento enquanto o job roda;
/// as linhas novas do log são impressas acima dele conforme chegam.
pub struct TerminalPresenter {
    // Spinner do indicatif.
    pb: ProgressBar,
    // Links públicos dos resultados.
    links: ResultLinks,
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl TerminalPresenter {
    /// Inicia o spinner para o job e retorna o apresentador.
    pub fn start(job_id: &JobId, links: ResultLinks) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("{job_id}: consultando..."));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            links,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    /// Chamado quando o usuário interrompe o acompanhamento.
    pub fn interrupted(&mut self) {
        self.pb.finish_and_clear();
        println!("  {}", self.dim.apply_to("(interrumpido)"));
    }

    fn state_style(&self, state: JobState) -> &Style {
        match state {
            JobState::Done => &self.green,
            JobState::Error => &self.red,
            JobState::Review | JobState::Fixme => &self.yellow,
            JobState::Available | JobState::Running => &self.dim,
        }
    }

    fn print_affordances(&self, affordances: &Affordances) {
        let flag = |enabled: bool| if enabled { "✓" } else { "·" };
        println!(
            "  procesar {}  revisar {}  descargar {}",
            flag(affordances.process),
            flag(affordances.review),
            flag(affordances.download)
        );
    }
}

impl Presenter for TerminalPresenter {
    fn update(&mut self, update: &PollUpdate) {
        let stamp = update.received_at.format("%H:%M:%S").to_string();
        for line in &update.new_log_lines {
            self.pb
                .println(format!("  {} {line}", self.dim.apply_to(&stamp)));
        }
        let mut message = format!(
            "{} [{}] {}",
            update.job_id,
            self.state_style(update.state).apply_to(update.state),
            update.message
        );
        if !update.review_items.is_empty() {
            message.push_str(&format!(" ({} por revisar)", update.review_items.len()));
        }
        self.pb.set_message(message);
    }

    /// Esconde o spinner e imprime os painéis finais.
    fn settled(&mut self, view: &TerminalView) {
        self.pb.finish_and_clear();
        let style = self.state_style(view.state);
        println!(
            "{} {}: {}",
            style.apply_to(format!("[{}]", view.state)),
            view.job_id,
            view.message
        );
        if view.show_log {
            println!("  {}", self.dim.apply_to(format!("{} líneas de registro", view.log_lines)));
            if let Some(line) = &view.last_log_line {
                println!("  {} {line}", self.dim.apply_to("última:"));
            }
        } else {
            println!("  {}", self.dim.apply_to("(sin registro)"));
        }
        self.print_affordances(&view.affordances);

        if view.review_notice {
            println!(
                "  {} Revisa el callejero: {}",
                self.yellow.apply_to("!"),
                self.links.street_names(&view.job_id)
            );
        }
        if view.fixme_notice {
            println!("  {} Hay tareas con fixmes pendientes", self.yellow.apply_to("!"));
        }
        if view.options_locked {
            println!("  {}", self.dim.apply_to("Opciones de importación bloqueadas"));
        }

        if !view.review_items.is_empty() {
            println!();
            println!("{}", self.yellow.apply_to("─── Revisar ───"));
            for item in &view.review_items {
                println!("  {}", self.links.task(&view.job_id, item));
                println!("    JOSM: {}", self.links.josm_import(&view.job_id, item));
            }
        }

        if !view.report_lines.is_empty() {
            println!();
            println!("{}", style.apply_to("─── Informe ───"));
            for line in &view.report_lines {
                // Blank report lines still take a row.
                println!("  {}", if line.is_empty() { " " } else { line.as_str() });
            }
        }

        if view.show_template {
            println!();
            println!(
                "  Importación de {} ({}): {}",
                view.import_kind.label_es(),
                view.import_kind.label_en(),
                self.links.download(&view.job_id)
            );
        }
    }

    fn failed(&mut self, job_id: &JobId, error: &ApiError) {
        self.pb.finish_and_clear();
        println!(
            "  {} {job_id}: {}",
            self.red.apply_to("✗"),
            error.user_message()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupting_clears_the_spinner() {
        let job_id = JobId::new("28079", None).unwrap();
        let mut presenter =
            TerminalPresenter::start(&job_id, ResultLinks::new("http://cat.example.org/"));
        assert!(!presenter.pb.is_finished());
        presenter.interrupted();
        assert!(presenter.pb.is_finished());
    }
}
