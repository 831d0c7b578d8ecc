use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use catalog_core::{update, AppState, Msg};
use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::command::{parse_command, Command, HELP};
use crate::config::DashboardConfig;
use crate::effects::EffectRunner;
use crate::render::render;

/// Everything the console loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Input(String),
    InputClosed,
}

/// Drive the dashboard from stdin until `quit` or end of input.
///
/// Input lines wait while requests are in flight, so a scripted session sees
/// the same catalog an interactive user would.
pub fn run(config: &DashboardConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config, event_tx.clone())?;
    spawn_input_reader(event_tx);

    let mut console = Console {
        state: AppState::with_page_size(config.page_size),
        runner,
        pending_input: VecDeque::new(),
        input_closed: false,
    };
    println!("Product catalog dashboard. Type `help` for commands.");
    console.dispatch(Msg::LoadRequested);

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => console.dispatch(msg),
            AppEvent::Input(line) => console.pending_input.push_back(line),
            AppEvent::InputClosed => {
                catalog_debug!("stdin closed");
                console.input_closed = true;
            }
        }
        if console.drain_input() == Flow::Quit {
            break;
        }
        if console.input_closed
            && console.pending_input.is_empty()
            && console.state.requests_in_flight() == 0
        {
            break;
        }
    }
    catalog_info!("console loop finished");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Console {
    state: AppState,
    runner: EffectRunner,
    pending_input: VecDeque<String>,
    input_closed: bool,
}

impl Console {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            print_lines(&render(&state.view()));
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn drain_input(&mut self) -> Flow {
        while self.state.requests_in_flight() == 0 {
            let Some(line) = self.pending_input.pop_front() else {
                break;
            };
            match parse_command(&line, &today()) {
                Ok(Command::Dispatch(msg)) => self.dispatch(msg),
                Ok(Command::Help) => println!("{HELP}"),
                Ok(Command::Quit) => return Flow::Quit,
                Err(err) => {
                    catalog_warn!("rejected input {:?}: {}", line, err);
                    println!("{err}");
                }
            }
        }
        prompt();
        Flow::Continue
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

fn print_lines(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}

fn prompt() {
    let mut out = io::stdout();
    let _ = write!(out, "> ");
    let _ = out.flush();
}

/// UTC date used in export filenames.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
