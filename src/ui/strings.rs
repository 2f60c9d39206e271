//! User-facing text in English and Portuguese

use clap::ValueEnum;

use crate::app::{MonitorEvent, SortMode};
use crate::system::TerminateError;

/// UI language, selected with `--lang`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "pt")]
    Portuguese,
}

impl Language {
    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &ENGLISH,
            Language::Portuguese => &PORTUGUESE,
        }
    }
}

/// Every piece of text the front end prints.
///
/// Templates use `{name}`, `{reason}`, `{shown}` and `{total}` placeholders.
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search_placeholder: &'static str,
    pub search_label: &'static str,

    pub header_application: &'static str,
    pub header_cpu: &'static str,
    pub header_memory: &'static str,

    pub sort_label: &'static str,
    pub sort_name: &'static str,
    pub sort_cpu: &'static str,
    pub sort_memory: &'static str,
    pub refresh_label: &'static str,
    pub count_all: &'static str,
    pub count_filtered: &'static str,

    pub confirm_title: &'static str,
    pub confirm_prompt: &'static str,
    pub data_loss_warning: &'static str,
    /// Keys accepted as "yes" in the confirmation prompt
    pub yes_keys: &'static [char],

    pub terminated: &'static str,
    pub already_exited: &'static str,
    pub terminate_error: &'static str,
    pub refused: &'static str,
    pub access_denied: &'static str,
    pub enumeration_failed: &'static str,

    pub empty_list: &'static str,
    pub no_match: &'static str,
    pub hints: &'static str,
    pub search_hints: &'static str,
    pub confirm_hints: &'static str,
}

static ENGLISH: Strings = Strings {
    title: "Process Manager",
    subtitle: "Monitor and control running applications",
    search_placeholder: "🔍 Search applications...",
    search_label: "Search",

    header_application: "APPLICATION",
    header_cpu: "CPU",
    header_memory: "MEMORY",

    sort_label: "Sort",
    sort_name: "Name",
    sort_cpu: "CPU",
    sort_memory: "Memory",
    refresh_label: "Refresh",
    count_all: "Applications: {total}",
    count_filtered: "Showing: {shown}/{total}",

    confirm_title: "Confirm Action",
    confirm_prompt: "Are you sure you want to terminate '{name}'?",
    data_loss_warning: "This may cause loss of unsaved data.",
    yes_keys: &['y', 'Y'],

    terminated: "Terminated '{name}'",
    already_exited: "'{name}' had already exited",
    terminate_error: "Error terminating process: {reason}",
    refused: "'{name}' is a protected process",
    access_denied: "access denied to '{name}'",
    enumeration_failed: "Could not read the process list: {reason}",

    empty_list: "No known applications are running",
    no_match: "No applications match the search",
    hints: " q:Quit | /:Search | s:Sort | 1/2/3:Name/CPU/Memory | r:Refresh | k:Terminate",
    search_hints: " Type to search | Enter:Apply | Esc:Clear",
    confirm_hints: " Y:Confirm | N/Esc:Cancel",
};

static PORTUGUESE: Strings = Strings {
    title: "Gestor de Processos",
    subtitle: "Monitorize e controle as aplicações em execução",
    search_placeholder: "🔍 Pesquisar aplicações...",
    search_label: "Pesquisar",

    header_application: "APLICAÇÃO",
    header_cpu: "CPU",
    header_memory: "MEMÓRIA",

    sort_label: "Ordenar",
    sort_name: "Nome",
    sort_cpu: "CPU",
    sort_memory: "Memória",
    refresh_label: "Atualização",
    count_all: "Aplicações: {total}",
    count_filtered: "A mostrar: {shown}/{total}",

    confirm_title: "Confirmar Ação",
    confirm_prompt: "Tem a certeza que deseja terminar '{name}'?",
    data_loss_warning: "Isto pode causar perda de dados não guardados.",
    yes_keys: &['s', 'S', 'y', 'Y'],

    terminated: "'{name}' terminado",
    already_exited: "'{name}' já tinha terminado",
    terminate_error: "Erro ao terminar o processo: {reason}",
    refused: "'{name}' é um processo protegido",
    access_denied: "acesso negado a '{name}'",
    enumeration_failed: "Não foi possível ler a lista de processos: {reason}",

    empty_list: "Nenhuma aplicação conhecida em execução",
    no_match: "Nenhuma aplicação corresponde à pesquisa",
    hints: " q:Sair | /:Pesquisar | s:Ordenar | 1/2/3:Nome/CPU/Memória | r:Atualizar | k:Terminar",
    search_hints: " Escreva para pesquisar | Enter:Aplicar | Esc:Limpar",
    confirm_hints: " S:Confirmar | N/Esc:Cancelar",
};

impl Strings {
    pub fn sort_mode_name(&self, mode: SortMode) -> &'static str {
        match mode {
            SortMode::Name => self.sort_name,
            SortMode::CpuDescending => self.sort_cpu,
            SortMode::MemoryDescending => self.sort_memory,
        }
    }

    pub fn confirm_message(&self, name: &str) -> String {
        format!(
            "{} {}",
            self.confirm_prompt.replace("{name}", name),
            self.data_loss_warning
        )
    }

    pub fn count(&self, shown: usize, total: usize, filtered: bool) -> String {
        let template = if filtered { self.count_filtered } else { self.count_all };
        template
            .replace("{shown}", &shown.to_string())
            .replace("{total}", &total.to_string())
    }

    /// Status-line text for a worker event
    pub fn event_message(&self, event: &MonitorEvent) -> String {
        match event {
            MonitorEvent::EnumerationFailed(error) => self
                .enumeration_failed
                .replace("{reason}", &error.to_string()),
            MonitorEvent::Terminated { name, .. } => self.terminated.replace("{name}", name),
            MonitorEvent::AlreadyExited { name, .. } => self.already_exited.replace("{name}", name),
            MonitorEvent::TerminateFailed { name, error } => {
                let reason = match error {
                    TerminateError::Refused { .. } => self.refused.replace("{name}", name),
                    TerminateError::AccessDenied { .. } => self.access_denied.replace("{name}", name),
                    TerminateError::Os { .. } => error.to_string(),
                };
                self.terminate_error.replace("{reason}", &reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEARCH_PLACEHOLDER_MARKER;
    use crate::system::EnumerationError;

    #[test]
    fn test_placeholders_carry_the_marker() {
        for language in [Language::English, Language::Portuguese] {
            assert!(language.strings().search_placeholder.contains(SEARCH_PLACEHOLDER_MARKER));
        }
    }

    #[test]
    fn test_confirm_message_includes_warning() {
        let en = Language::English.strings().confirm_message("Discord");
        assert_eq!(
            en,
            "Are you sure you want to terminate 'Discord'? This may cause loss of unsaved data."
        );
        let pt = Language::Portuguese.strings().confirm_message("Discord");
        assert!(pt.starts_with("Tem a certeza que deseja terminar 'Discord'?"));
        assert!(pt.ends_with("perda de dados não guardados."));
    }

    #[test]
    fn test_event_messages() {
        let en = Language::English.strings();
        let failed = MonitorEvent::TerminateFailed {
            name: "Steam".to_string(),
            error: TerminateError::AccessDenied { pid: 9 },
        };
        assert_eq!(
            en.event_message(&failed),
            "Error terminating process: access denied to 'Steam'"
        );

        let pt = Language::Portuguese.strings();
        let gone = MonitorEvent::EnumerationFailed(EnumerationError::Os("busy".to_string()));
        assert_eq!(
            pt.event_message(&gone),
            "Não foi possível ler a lista de processos: process enumeration failed: busy"
        );
    }

    #[test]
    fn test_count() {
        let en = Language::English.strings();
        assert_eq!(en.count(2, 2, false), "Applications: 2");
        assert_eq!(en.count(1, 4, true), "Showing: 1/4");
    }

    #[test]
    fn test_language_values() {
        assert_eq!(Language::from_str("pt", true), Ok(Language::Portuguese));
        assert_eq!(Language::default().strings().sort_mode_name(SortMode::MemoryDescending), "Memory");
    }
}
