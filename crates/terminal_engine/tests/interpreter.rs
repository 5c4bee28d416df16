use std::rc::Rc;

use chrono::{FixedOffset, TimeZone};
use futures::executor::block_on;
use pretty_assertions::assert_eq;
use terminal_engine::{
    standard_commands, DisplayText, FixedClock, FixedTarget, HostServices, LineKind, LinkTable,
    LinkTarget, MemoryNavigator, TerminalConfig, TerminalSession,
};

const PROMPT: &str = "dozamigos@visitante:~$";
const POBREFLIX: &str = "https://pobreflix.wolf-homelab.com.br/";

struct Harness {
    session: TerminalSession,
    navigator: Rc<MemoryNavigator>,
}

impl Harness {
    fn new() -> Self {
        let config = TerminalConfig::new(
            DisplayText {
                banner: "BANNER".to_string(),
                prompt: PROMPT.to_string(),
                welcome_message: "Bem-vindo".to_string(),
            },
            LinkTable::new(vec![
                LinkTarget {
                    name: "pobreflix".to_string(),
                    url: POBREFLIX.to_string(),
                },
                LinkTarget {
                    name: "pobrefy".to_string(),
                    url: "https://pobrefy.wolf-homelab.com.br/".to_string(),
                },
            ]),
            standard_commands(
                "Dozamigos Terminal v1.0",
                FixedTarget {
                    name: "sanguis".to_string(),
                    aliases: vec!["orchidaceae".to_string(), "orchid".to_string()],
                    description: "???".to_string(),
                    target: "/aurora-escarlate.html".to_string(),
                    confirmation: "Acessando a Aurora Escarlate...".to_string(),
                },
            ),
        )
        .expect("valid command table");
        let navigator = Rc::new(MemoryNavigator::new());
        let clock = FixedClock(
            FixedOffset::west_opt(3 * 3600)
                .expect("offset")
                .with_ymd_and_hms(2025, 7, 14, 21, 30, 9)
                .single()
                .expect("instant"),
        );
        let session = TerminalSession::new(
            Rc::new(config),
            HostServices::new(navigator.clone(), Rc::new(clock)),
        );
        Self { session, navigator }
    }

    fn submit(&mut self, line: &str) {
        self.session.on_text_changed(line);
        block_on(self.session.on_submit());
    }

    fn kinds(&self) -> Vec<LineKind> {
        self.session
            .scrollback()
            .iter()
            .map(|line| line.kind)
            .collect()
    }

    fn last_text(&self) -> &str {
        &self.session.scrollback().last().expect("scrollback line").text
    }
}

#[test]
fn every_submit_appends_one_echo_and_one_result() {
    let mut harness = Harness::new();
    for (index, line) in ["help", "links", "about", "date", "open", "open nope", "foobar"]
        .into_iter()
        .enumerate()
    {
        harness.submit(line);
        let lines = harness.session.scrollback();
        assert_eq!(lines.len(), (index + 1) * 2, "after `{line}`");
        assert_eq!(lines[index * 2].kind, LineKind::InputEcho);
        assert_eq!(lines[index * 2].text, format!("{PROMPT} {line}"));
        assert_ne!(lines[index * 2 + 1].kind, LineKind::InputEcho);
    }
}

#[test]
fn blank_submit_only_clears_the_buffer() {
    let mut harness = Harness::new();
    harness.submit("about");
    harness.session.on_history_prev();
    let before = harness.session.snapshot();
    let history = harness.session.history().to_vec();

    for blank in ["", "   ", "\t \n"] {
        harness.session.on_text_changed(blank);
        block_on(harness.session.on_submit());
        assert_eq!(harness.session.history(), history.as_slice());
        assert_eq!(harness.session.scrollback(), before.scrollback.as_slice());
        assert_eq!(harness.session.history_cursor(), before.history_cursor);
        assert_eq!(harness.session.input_buffer(), "");
        assert!(harness.session.suggestions().is_empty());
    }
    assert!(harness.navigator.opened().is_empty());
}

#[test]
fn history_round_trip_clamps_and_returns_to_sentinel() {
    let mut harness = Harness::new();
    for line in ["a", "b", "c"] {
        harness.submit(line);
    }
    assert_eq!(harness.session.history(), ["a", "b", "c"]);

    let session = &mut harness.session;
    session.on_history_prev();
    assert_eq!(session.input_buffer(), "c");
    session.on_history_prev();
    assert_eq!(session.input_buffer(), "b");
    session.on_history_prev();
    assert_eq!(session.input_buffer(), "a");
    session.on_history_prev();
    assert_eq!(session.input_buffer(), "a");
    assert_eq!(session.history_cursor(), Some(0));

    session.on_history_next();
    assert_eq!(session.input_buffer(), "b");
    session.on_history_next();
    assert_eq!(session.input_buffer(), "c");
    session.on_history_next();
    assert_eq!(session.input_buffer(), "");
    assert_eq!(session.history_cursor(), None);

    session.on_history_next();
    assert_eq!(session.history_cursor(), None);
}

#[test]
fn recalled_history_entry_refreshes_suggestions() {
    let mut harness = Harness::new();
    harness.submit("about");
    harness.submit("xyz");

    harness.session.on_text_changed("h");
    assert_eq!(harness.session.suggestions(), ["help"]);

    harness.session.on_history_prev();
    assert_eq!(harness.session.input_buffer(), "xyz");
    assert!(harness.session.suggestions().is_empty());
    assert!(!harness.session.snapshot().shows_suggestions());

    harness.session.on_history_prev();
    assert_eq!(harness.session.input_buffer(), "about");
    assert_eq!(harness.session.suggestions(), ["about"]);

    harness.session.on_accept_suggestion();
    assert_eq!(harness.session.input_buffer(), "about");

    harness.session.on_history_next();
    assert_eq!(harness.session.input_buffer(), "xyz");
    assert!(harness.session.suggestions().is_empty());

    harness.session.on_history_prev();
    harness.session.on_history_next();
    harness.session.on_history_next();
    assert_eq!(harness.session.input_buffer(), "");
    assert!(harness.session.suggestions().is_empty());
}

#[test]
fn history_prev_with_empty_history_is_noop() {
    let mut harness = Harness::new();
    harness.session.on_text_changed("draft");
    harness.session.on_history_prev();
    assert_eq!(harness.session.input_buffer(), "draft");
    assert_eq!(harness.session.history_cursor(), None);
}

#[test]
fn editing_a_recalled_entry_keeps_the_history_cursor() {
    let mut harness = Harness::new();
    harness.submit("help");
    harness.submit("about");

    harness.session.on_history_prev();
    assert_eq!(harness.session.history_cursor(), Some(1));
    harness.session.on_text_changed("about me");
    assert_eq!(harness.session.history_cursor(), Some(1));

    harness.session.on_history_prev();
    assert_eq!(harness.session.input_buffer(), "help");
    assert_eq!(harness.session.history_cursor(), Some(0));
}

#[test]
fn suggestions_follow_the_input_prefix() {
    let mut harness = Harness::new();
    harness.session.on_text_changed("h");
    assert_eq!(harness.session.suggestions(), ["help"]);
    harness.session.on_text_changed("l");
    assert_eq!(harness.session.suggestions(), ["links"]);
    harness.session.on_text_changed("xyz");
    assert!(harness.session.suggestions().is_empty());
    harness.session.on_text_changed("");
    assert!(harness.session.suggestions().is_empty());

    harness.session.on_text_changed("CL");
    harness.submit("clear");
    assert!(harness.session.suggestions().is_empty());
}

#[test]
fn resolution_is_case_insensitive_and_alias_transparent() {
    let mut outputs = Vec::new();
    for token in ["HELP", "help", "h", "?"] {
        let mut harness = Harness::new();
        harness.submit(token);
        assert_eq!(harness.kinds(), vec![LineKind::InputEcho, LineKind::Output]);
        outputs.push(harness.last_text().to_string());
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(outputs[0].starts_with("Comandos disponíveis:"));
    assert!(outputs[0].contains("(aliases: orchidaceae, orchid)"));
}

#[test]
fn clear_and_cls_empty_scrollback_but_keep_history() {
    for command in ["clear", "cls", "CLS"] {
        let mut harness = Harness::new();
        harness.submit("about");
        harness.submit(command);
        assert!(harness.session.scrollback().is_empty(), "after `{command}`");
        assert_eq!(harness.session.history(), ["about", command]);
    }
}

#[test]
fn open_unknown_link_reports_error_without_navigation() {
    let mut harness = Harness::new();
    harness.submit("open nope");
    assert_eq!(harness.kinds(), vec![LineKind::InputEcho, LineKind::Error]);
    assert!(harness.last_text().contains("nope"));
    assert!(harness.navigator.opened().is_empty());
}

#[test]
fn open_known_link_navigates_once_and_confirms() {
    let mut harness = Harness::new();
    harness.submit("go PobreFlix");
    assert_eq!(harness.kinds(), vec![LineKind::InputEcho, LineKind::Output]);
    assert_eq!(
        harness.last_text(),
        format!("Abrindo pobreflix... ({POBREFLIX})")
    );
    assert_eq!(harness.navigator.opened(), vec![POBREFLIX]);
}

#[test]
fn open_without_arguments_prints_usage() {
    let mut harness = Harness::new();
    harness.submit("open");
    assert_eq!(harness.kinds(), vec![LineKind::InputEcho, LineKind::Output]);
    assert!(harness.last_text().starts_with("Uso: open <nome_do_link>"));
    assert!(harness.navigator.opened().is_empty());
}

#[test]
fn unknown_command_names_the_token_and_points_at_help() {
    let mut harness = Harness::new();
    harness.submit("foobar --x");
    assert_eq!(harness.kinds(), vec![LineKind::InputEcho, LineKind::Error]);
    assert_eq!(
        harness.last_text(),
        "Comando não encontrado: foobar. Digite 'help' para ver os comandos disponíveis."
    );
    assert_eq!(harness.session.history(), ["foobar --x"]);
}

#[test]
fn fixed_target_command_navigates_to_configured_target() {
    let mut harness = Harness::new();
    harness.submit("orchid ignored-argument");
    assert_eq!(harness.last_text(), "Acessando a Aurora Escarlate...");
    assert_eq!(harness.navigator.opened(), vec!["/aurora-escarlate.html"]);
}

#[test]
fn links_and_date_render_configuration_and_clock() {
    let mut harness = Harness::new();
    harness.submit("l");
    assert!(harness.last_text().contains(&format!("pobreflix    - {POBREFLIX}")));
    assert!(harness.last_text().ends_with("Use 'open <nome>' para abrir um link."));

    harness.submit("date");
    assert_eq!(harness.last_text(), "14/07/2025, 21:30:09");
}

#[test]
fn about_prints_configured_text() {
    let mut harness = Harness::new();
    harness.submit("ABOUT");
    assert_eq!(harness.last_text(), "Dozamigos Terminal v1.0");
}
