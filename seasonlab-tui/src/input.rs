//! Keyboard input dispatch: quit keys, ticker editing, year-column scrolling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

const PAGE: usize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    match key.code {
        // Quit keys only act on an empty box so tickers can contain 'q'.
        KeyCode::Esc | KeyCode::Char('q') if app.input.is_empty() => {
            app.running = false;
        }
        KeyCode::Esc => app.input.clear(),
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Right => app.scroll_right(1),
        KeyCode::Left => app.scroll_left(1),
        KeyCode::PageDown => app.scroll_right(PAGE),
        KeyCode::PageUp => app.scroll_left(PAGE),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerCommand;
    use std::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx), cmd_rx)
    }

    #[test]
    fn typing_then_enter_fetches() {
        let (mut app, cmd_rx) = app();
        for c in "QQQ".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            WorkerCommand::Fetch {
                ticker: "QQQ".into()
            }
        );
        assert!(app.running);
    }

    #[test]
    fn q_types_into_non_empty_box() {
        let (mut app, _rx) = app();
        handle_key(&mut app, press(KeyCode::Char('Q')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.input, "Qq");
        assert!(app.running);
    }

    #[test]
    fn esc_clears_then_quits() {
        let (mut app, _rx) = app();
        app.input = "SPY".into();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.input.is_empty());
        assert!(app.running);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn q_on_empty_box_quits() {
        let (mut app, _rx) = app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn arrows_scroll_year_columns() {
        use seasonlab_core::domain::AssetMetadata;
        use seasonlab_core::report::build_report;
        use seasonlab_core::synthetic::constant_return_bars;
        use std::sync::Arc;

        let (mut app, _rx) = app();
        let bars = constant_return_bars(2018, &[0.001; 4], 21);
        app.report = Some(Arc::new(
            build_report("TEST", &bars, &AssetMetadata::default()).unwrap(),
        ));

        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.table_scroll, 2);
        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.table_scroll, 1);
        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.table_scroll, 3);
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.table_scroll, 3);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let (mut app, _rx) = app();
        app.input = "SPY".into();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }
}
