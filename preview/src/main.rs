//! Desktop preview app for myrtio-ring-chaser
//!
//! Simulates the reference board in a window: the LED ring, a bouncing
//! direction button and the serial console. All board collaborators are
//! replaced by in-memory doubles driven from synthetic time.

use std::f32::consts::TAU;
use std::time::Instant as StdInstant;

use eframe::egui::{self, Color32, Pos2, Sense, Vec2};
use myrtio_ring_chaser::{
    ChaseScheduler, ChaserConfig, ChaserState, DebouncePhase, Direction, DirectionController,
    Duration, EdgeOutcome, EdgeSource, Instant, LedRing, LineDriver, LineId, OneShotTimer,
    SerialQueue, SpeedController, StatusSink,
};

/// Reference board configuration
const CONFIG: ChaserConfig<9> = ChaserConfig::REFERENCE;

/// Serial receive queue size
const SERIAL_QUEUE_SIZE: usize = 32;

/// Maximum number of status lines kept in the console
const MAX_STATUS_LINES: usize = 200;

/// Radius of each LED in pixels
const LED_RADIUS: f32 = 14.0;

/// Shared chaser state, as it would live in a firmware static
static STATE: ChaserState = ChaserState::new(CONFIG.initial_period_ms);

/// Serial receive queue filled by the console input
static SERIAL_RX: SerialQueue<SERIAL_QUEUE_SIZE> = SerialQueue::new();

/// Simulated GPIO bank
struct SimLines {
    levels: [bool; 32],
}

impl LineDriver for SimLines {
    fn configure_lines(&mut self, ids: &[LineId]) {
        for id in ids {
            self.levels[usize::from(*id)] = false;
        }
    }

    fn set_line(&mut self, id: LineId, level: bool) {
        self.levels[usize::from(id)] = level;
    }

    fn read_line(&self, id: LineId) -> bool {
        self.levels[usize::from(id)]
    }
}

/// Simulated edge interrupt enable bit
struct SimEdges {
    enabled: bool,
}

impl EdgeSource for SimEdges {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}

/// One-shot timer running on synthetic time
struct SimTimer {
    now_ms: u64,
    deadline_ms: Option<u64>,
}

impl SimTimer {
    /// Returns `true` once when the scheduled deadline has passed
    fn take_expired(&mut self) -> bool {
        match self.deadline_ms {
            Some(deadline) if self.now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

impl OneShotTimer for SimTimer {
    fn schedule_once(&mut self, delay: Duration) {
        self.deadline_ms = Some(self.now_ms + delay.as_millis());
    }
}

/// Console output collecting status lines
#[derive(Default)]
struct Console {
    lines: Vec<String>,
}

impl StatusSink for Console {
    fn write_status(&mut self, line: &str) {
        if self.lines.len() == MAX_STATUS_LINES {
            self.lines.remove(0);
        }
        self.lines.push(line.to_owned());
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 560.0])
            .with_title("Ring Chaser Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-ring-chaser-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: ChaseScheduler<'static, SimLines, 9>,
    direction: DirectionController<'static, SimEdges, SimTimer>,
    speed: SpeedController<'static>,
    console: Console,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Edges produced by one simulated press
    bounce_edges: u32,
    /// Presses that flipped the direction
    accepted: u32,
    /// Edges dropped by the debounce
    dropped: u32,
    /// Serial console input
    serial_input: String,
}

impl PreviewApp {
    fn new() -> Self {
        let lines = SimLines { levels: [false; 32] };
        let ring = LedRing::new(lines, CONFIG.lines);

        Self {
            scheduler: ChaseScheduler::new(ring, &STATE),
            direction: DirectionController::new(
                &STATE,
                SimEdges { enabled: false },
                SimTimer {
                    now_ms: 0,
                    deadline_ms: None,
                },
                CONFIG.debounce,
            ),
            speed: SpeedController::new(&STATE, CONFIG.bounds),
            console: Console::default(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            bounce_edges: 4,
            accepted: 0,
            dropped: 0,
            serial_input: String::new(),
        }
    }

    /// Update synthetic time based on wall clock
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        #[allow(clippy::cast_possible_truncation)]
        let delta_ms = delta.as_millis() as u64;
        self.t_ms = self.t_ms.wrapping_add(delta_ms);
        self.direction.timer_mut().now_ms = self.t_ms;
    }

    /// Simulate one press with contact bounce
    fn press_button(&mut self) {
        for _ in 0..self.bounce_edges {
            if !self.direction.edges().enabled {
                self.dropped += 1;
                continue;
            }
            match self.direction.on_edge() {
                EdgeOutcome::Flipped(_) => self.accepted += 1,
                EdgeOutcome::Ignored => self.dropped += 1,
            }
        }
    }

    /// Queue bytes as if they arrived on the UART
    fn send_serial(&self, bytes: &[u8]) {
        for byte in bytes {
            let _ = SERIAL_RX.push(*byte);
        }
    }

    /// Deliver timer and serial events, then advance the chase
    fn process(&mut self) {
        if self.direction.timer_mut().take_expired() {
            self.direction.on_timer_fired();
        }
        self.speed.drain(&SERIAL_RX, &mut self.console);
        self.scheduler.poll(Instant::from_millis(self.t_ms));
    }

    fn draw_ring(&self, ui: &mut egui::Ui) {
        let size = Vec2::splat(260.0);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let center = response.rect.center();
        let radius = size.x / 2.0 - LED_RADIUS * 2.0;
        let driver = self.scheduler.ring().driver();

        for (i, line) in CONFIG.lines.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f32 / CONFIG.lines.len() as f32 - TAU / 4.0;
            let pos = Pos2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            let fill = if driver.read_line(*line) {
                Color32::from_rgb(255, 70, 40)
            } else {
                Color32::from_rgb(50, 20, 20)
            };
            painter.circle_filled(pos, LED_RADIUS, fill);
            painter.circle_stroke(pos, LED_RADIUS, (1.0, Color32::GRAY));
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.process();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.draw_ring(ui);

                ui.vertical(|ui| {
                    let direction = match STATE.direction() {
                        Direction::Forward => "⟳ forward",
                        Direction::Backward => "⟲ backward",
                    };
                    ui.label(format!("Direction: {direction}"));
                    ui.label(format!("Period: {} ms", STATE.period_ms()));
                    let phase = match self.direction.phase() {
                        DebouncePhase::Armed => "armed",
                        DebouncePhase::Cooldown => "cooldown",
                    };
                    ui.label(format!("Button: {phase}"));
                    ui.label(format!(
                        "Presses: {} accepted, {} edges dropped",
                        self.accepted, self.dropped
                    ));

                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        if ui.button("Press button").clicked() {
                            self.press_button();
                        }
                        ui.label("Bounce:");
                        ui.add(egui::Slider::new(&mut self.bounce_edges, 1..=10));
                    });

                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        if ui.button("+ faster").clicked() {
                            self.send_serial(b"+");
                        }
                        if ui.button("- slower").clicked() {
                            self.send_serial(b"-");
                        }
                    });
                });
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label("Serial:");
                let input = ui.text_edit_singleline(&mut self.serial_input);
                let submitted =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Send").clicked() || submitted {
                    let bytes = std::mem::take(&mut self.serial_input);
                    self.send_serial(bytes.as_bytes());
                }
            });

            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.console.lines {
                        ui.monospace(line);
                    }
                });
        });
    }
}
