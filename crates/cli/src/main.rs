use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::Sender;

use touchguard_core::capture::infrastructure::image_dir_source::ImageDirSource;
use touchguard_core::classify::domain::gesture_label::GestureLabel;
use touchguard_core::classify::domain::prediction::Prediction;
use touchguard_core::shared::config::WorkflowConfig;
use touchguard_core::workflow::presenter::Presenter;
use touchguard_core::workflow::session_initializer::SessionInitializer;
use touchguard_core::workflow::workflow_state::Phase;

/// Interactive face-touch detection: train two gesture classes from the
/// camera, then watch continuously.
#[derive(Parser)]
#[command(name = "touchguard")]
struct Cli {
    /// Camera device to capture from.
    #[arg(long, default_value = "/dev/video0")]
    camera: PathBuf,

    /// Cycle images from this directory instead of opening a camera.
    #[arg(long)]
    images: Option<PathBuf>,

    /// Path to the MobileNet ONNX model (skips the download).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Training examples collected per class.
    #[arg(long, default_value = "100")]
    samples: usize,

    /// Pause between training captures, in milliseconds.
    #[arg(long, default_value = "100")]
    sample_interval_ms: u64,

    /// Pause between classification ticks, in milliseconds.
    #[arg(long, default_value = "100")]
    classify_interval_ms: u64,

    /// Minimum touching confidence for a positive detection (0.0-1.0).
    #[arg(long, default_value = "0.8")]
    threshold: f64,
}

/// Events sent from the workflow thread to the rendering loop.
enum SessionEvent {
    Phase(Phase),
    Progress {
        label: GestureLabel,
        done: usize,
        total: usize,
    },
    Prediction {
        label: GestureLabel,
        confidence: f64,
        gesture_active: bool,
    },
    TransientError {
        kind: String,
        message: String,
    },
    Finished(Option<String>),
}

/// Forwards workflow events over a channel so rendering never blocks the
/// sampling or classify loops.
struct ChannelPresenter {
    tx: Sender<SessionEvent>,
}

impl Presenter for ChannelPresenter {
    fn phase_changed(&mut self, phase: &Phase) {
        let _ = self.tx.send(SessionEvent::Phase(phase.clone()));
    }

    fn training_progress(&mut self, label: GestureLabel, done: usize, total: usize) {
        let _ = self.tx.send(SessionEvent::Progress { label, done, total });
    }

    fn prediction(&mut self, prediction: &Prediction, gesture_active: bool) {
        let _ = self.tx.send(SessionEvent::Prediction {
            label: prediction.label(),
            confidence: prediction.confidence_of(prediction.label()),
            gesture_active,
        });
    }

    fn error(&mut self, kind: &str, message: &str) {
        let _ = self.tx.send(SessionEvent::TransientError {
            kind: kind.to_string(),
            message: message.to_string(),
        });
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.threshold) {
        return Err("--threshold must be between 0.0 and 1.0".into());
    }

    let config = WorkflowConfig {
        samples_per_class: cli.samples,
        sample_interval: Duration::from_millis(cli.sample_interval_ms),
        classify_interval: Duration::from_millis(cli.classify_interval_ms),
        confidence_threshold: cli.threshold,
    };

    let (tx, rx) = crossbeam_channel::unbounded::<SessionEvent>();
    let presenter = Box::new(ChannelPresenter { tx: tx.clone() });
    let cancelled = Arc::new(AtomicBool::new(false));

    let initializer = SessionInitializer::new(config);
    let mut workflow = match &cli.images {
        Some(dir) => {
            let source = ImageDirSource::open(dir)?;
            initializer.initialize_with_source(
                Box::new(source),
                cli.model.as_deref(),
                presenter,
                cancelled.clone(),
            )?
        }
        None => initializer.initialize(
            &cli.camera,
            cli.model.as_deref(),
            presenter,
            cancelled.clone(),
        )?,
    };

    eprintln!("Keep your hands away from your face, then press Enter to start training.");
    wait_for_enter()?;

    let worker = thread::spawn(move || {
        let result = workflow.train_and_run();
        let _ = tx.send(SessionEvent::Finished(result.err().map(|e| e.to_string())));
    });

    spawn_quit_watcher(cancelled.clone());
    render_events(&rx);

    worker.join().map_err(|_| "Workflow thread panicked")?;
    Ok(())
}

fn wait_for_enter() -> Result<(), Box<dyn std::error::Error>> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Watches stdin for `q` and flips the cancellation token. Detached: the
/// process exits once the render loop sees the finish event.
fn spawn_quit_watcher(cancelled: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if matches!(line.trim(), "q" | "quit") {
                cancelled.store(true, Ordering::Relaxed);
                break;
            }
        }
    });
}

fn render_events(rx: &crossbeam_channel::Receiver<SessionEvent>) {
    for event in rx {
        match event {
            SessionEvent::Phase(phase) => render_phase(&phase),
            SessionEvent::Progress { label, done, total } => {
                eprint!("\rTraining '{label}': {done}/{total}");
                if done == total {
                    eprintln!();
                }
            }
            SessionEvent::Prediction {
                label,
                confidence,
                gesture_active,
            } => {
                let verdict = if gesture_active {
                    "HANDS OFF YOUR FACE"
                } else {
                    "ok"
                };
                eprint!("\r{label} ({confidence:.2}) — {verdict}        ");
            }
            SessionEvent::TransientError { kind, message } => {
                log::warn!("{kind} error: {message}");
            }
            SessionEvent::Finished(error) => {
                eprintln!();
                match error {
                    Some(message) => eprintln!("Session stopped: {message}"),
                    None => eprintln!("Session ended."),
                }
                return;
            }
        }
    }
}

fn render_phase(phase: &Phase) {
    match phase {
        Phase::Initializing => {}
        Phase::Ready => eprintln!("Ready."),
        Phase::Training { label, .. } => match label {
            GestureLabel::NotTouching => {
                eprintln!("Training '{label}' — keep your hands down.")
            }
            GestureLabel::Touching => {
                eprintln!("Training '{label}' — touch your face now.")
            }
        },
        Phase::Running => {
            eprintln!("Watching. Type 'q' + Enter to stop.");
        }
    }
}
