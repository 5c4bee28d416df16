//! Terminal page UI backed by the interpreter session in [`terminal_engine`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod navigator;

use std::{cell::RefCell, rc::Rc};

use leptos::ev::KeyboardEvent;
use leptos::html::{Div, Input};
use leptos::*;
use terminal_contract::{LineKind, SessionSnapshot, TerminalEvent};
use terminal_engine::{HostServices, TerminalConfig, TerminalSession};

pub use navigator::BrowserNavigator;

/// Session event bound to a key, and whether the browser default must be suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyBinding {
    event: TerminalEvent,
    prevent_default: bool,
}

fn binding_for_key(key: &str) -> Option<KeyBinding> {
    let (event, prevent_default) = match key {
        "Enter" => (TerminalEvent::Submit, false),
        "ArrowUp" => (TerminalEvent::HistoryPrev, true),
        "ArrowDown" => (TerminalEvent::HistoryNext, true),
        "Tab" => (TerminalEvent::AcceptSuggestion, true),
        _ => return None,
    };
    Some(KeyBinding {
        event,
        prevent_default,
    })
}

fn line_class(kind: LineKind) -> &'static str {
    match kind {
        LineKind::InputEcho => "terminal-line terminal-line-input",
        LineKind::Output => "terminal-line terminal-line-output",
        LineKind::Error => "terminal-line terminal-line-error",
    }
}

/// Applies one event to the session and publishes the resulting snapshot.
///
/// Submissions publish twice: once after the echo, once after the command action resolves.
fn dispatch_event(
    session: &Rc<RefCell<TerminalSession>>,
    snapshot: RwSignal<SessionSnapshot>,
    event: TerminalEvent,
) {
    match event {
        TerminalEvent::Submit => {
            let pending = session.borrow_mut().begin_submit();
            snapshot.set(session.borrow().snapshot());
            if let Some(pending) = pending {
                let session = session.clone();
                spawn_local(async move {
                    let outcome = pending.run().await;
                    session.borrow_mut().finish_submit(outcome);
                    snapshot.set(session.borrow().snapshot());
                });
            }
            return;
        }
        TerminalEvent::TextChanged { text } => session.borrow_mut().on_text_changed(text),
        TerminalEvent::HistoryPrev => session.borrow_mut().on_history_prev(),
        TerminalEvent::HistoryNext => session.borrow_mut().on_history_next(),
        TerminalEvent::AcceptSuggestion => session.borrow_mut().on_accept_suggestion(),
    }
    snapshot.set(session.borrow().snapshot());
}

#[component]
/// Full-page simulated terminal.
///
/// Renders the banner header, link bar, and welcome text above the session scrollback, and
/// forwards input/key events to one [`TerminalSession`].
pub fn TerminalApp(
    /// Shared display configuration and command table.
    config: Rc<TerminalConfig>,
    /// Host capabilities used by command actions and the link bar.
    host: HostServices,
) -> impl IntoView {
    let session = Rc::new(RefCell::new(TerminalSession::new(
        config.clone(),
        host.clone(),
    )));
    let snapshot = create_rw_signal(session.borrow().snapshot());
    let input_ref = create_node_ref::<Input>();
    let screen_ref = create_node_ref::<Div>();

    input_ref.on_load(|input| {
        let _ = input.focus();
    });

    create_effect(move |_| {
        snapshot.with(|state| state.scrollback.len());
        if let Some(screen) = screen_ref.get() {
            screen.set_scroll_top(screen.scroll_height());
        }
    });

    let on_input = {
        let session = session.clone();
        move |ev: ev::Event| {
            dispatch_event(
                &session,
                snapshot,
                TerminalEvent::TextChanged {
                    text: event_target_value(&ev),
                },
            )
        }
    };
    let on_keydown = {
        let session = session.clone();
        move |ev: KeyboardEvent| {
            let Some(binding) = binding_for_key(ev.key().as_str()) else {
                return;
            };
            if binding.prevent_default {
                ev.prevent_default();
            }
            dispatch_event(&session, snapshot, binding.event);
        }
    };

    let links = config
        .links
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, link)| {
            let host = host.clone();
            let url = link.url.clone();
            view! {
                <span>
                    {(index > 0).then(|| view! { <span class="terminal-link-separator">"-"</span> })}
                    <span
                        class="terminal-link"
                        title=link.url
                        on:click=move |_| host.navigator.open_external(&url)
                    >
                        {link.name}
                    </span>
                </span>
            }
        })
        .collect_view();

    let prompt = config.display.prompt.clone();
    let banner = config.display.banner.clone();
    let welcome = config.display.welcome_message.clone();

    view! {
        <div
            class="terminal-root terminal-scanlines"
            on:click=move |_| {
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.focus();
                }
            }
        >
            <div class="terminal-screen" node_ref=screen_ref role="log" aria-live="polite">
                <header class="terminal-header">
                    <pre class="terminal-banner">{banner}</pre>
                    <nav class="terminal-links">{links}</nav>
                    <p class="terminal-welcome">{welcome}</p>
                </header>

                <div class="terminal-scrollback">
                    {move || {
                        snapshot
                            .with(|state| state.scrollback.clone())
                            .into_iter()
                            .map(|line| view! { <div class=line_class(line.kind)>{line.text}</div> })
                            .collect_view()
                    }}
                </div>

                <div class="terminal-input-row">
                    <label class="terminal-prompt">{prompt}</label>
                    <input
                        node_ref=input_ref
                        class="terminal-input"
                        type="text"
                        prop:value=move || snapshot.with(|state| state.input_buffer.clone())
                        on:input=on_input
                        on:keydown=on_keydown
                        autocomplete="off"
                        spellcheck="false"
                    />
                    <span class="terminal-cursor">"█"</span>
                </div>

                <Show when=move || snapshot.with(SessionSnapshot::shows_suggestions) fallback=|| ()>
                    <div class="terminal-suggestions">
                        <span>"Sugestões: "</span>
                        <span class="terminal-suggestion">
                            {move || snapshot.with(|state| state.suggestions.join(" "))}
                        </span>
                        <span class="terminal-suggestions-hint">" (TAB para completar)"</span>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn navigation_keys_suppress_browser_default() {
        for (key, event) in [
            ("ArrowUp", TerminalEvent::HistoryPrev),
            ("ArrowDown", TerminalEvent::HistoryNext),
            ("Tab", TerminalEvent::AcceptSuggestion),
        ] {
            assert_eq!(
                binding_for_key(key),
                Some(KeyBinding {
                    event,
                    prevent_default: true,
                })
            );
        }
    }

    #[test]
    fn enter_submits_and_other_keys_are_ignored() {
        assert_eq!(
            binding_for_key("Enter"),
            Some(KeyBinding {
                event: TerminalEvent::Submit,
                prevent_default: false,
            })
        );
        assert_eq!(binding_for_key("a"), None);
        assert_eq!(binding_for_key("Escape"), None);
    }

    #[test]
    fn line_classes_distinguish_kinds() {
        assert!(line_class(LineKind::InputEcho).ends_with("input"));
        assert!(line_class(LineKind::Output).ends_with("output"));
        assert!(line_class(LineKind::Error).ends_with("error"));
    }
}
