//! Counter demo: a keyed reconciler driving the host on a real terminal.
//!
//! Keys: `↑`/`+`/`=` increment, `↓`/`-` decrement, `r` resets, `q` or
//! `Ctrl-C` quits. Set `RUST_LOG=gilt_tui_host=trace` and redirect stderr to
//! watch the hook calls.
//!
//! ```text
//! cargo run --example counter --features macros 2> host.log
//! ```

use std::error::Error;
use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use tracing_subscriber::EnvFilter;

use gilt_tui_host::color::Color;
use gilt_tui_host::dom::{InstanceId, InstanceKind, Scene};
use gilt_tui_host::testing::KeyedReconciler;
use gilt_tui_host::{view, Root, Surface, VirtualNode};

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

fn app(count: i64) -> VirtualNode {
    let color = match count {
        c if c > 0 => Color::rgb(0, 255, 0),
        c if c < 0 => Color::rgb(255, 68, 68),
        _ => Color::WHITE,
    };

    view! {
        <box
            id="main-box"
            x=50
            y=3
            width=50
            height=20
            background_color={Color::from_ints(10, 20, 40, 255)}
            border_color={Color::from_ints(100, 10, 255, 255)}
            border_style="double"
        >
            <group id="group1" width=50>
                <text id="t1" content="Hello gilt-tui-host!" fg="#ff69b4" border_style="double" />
                <text id="t2" content="gilt-tui-host + keyed reconciler" fg="#64b5f6" />
                <group id="counter-group">
                    <text id="counter" content={count.to_string()} fg={color} />
                </group>
            </group>
            <group id="instructions-group">
                <text id="instr1" content="↑/+ : Increment" fg="#bbbbbb" />
                <text id="instr2" content="↓/- : Decrement" fg="#bbbbbb" />
                <text id="instr3" content="R   : Reset" fg="#bbbbbb" />
            </group>
        </box>
    }
}

// ---------------------------------------------------------------------------
// TerminalSurface
// ---------------------------------------------------------------------------

/// Draws the scene as an indented outline on the alternate screen.
struct TerminalSurface {
    out: Stdout,
}

impl TerminalSurface {
    fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(Self { out })
    }

    fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        let mut row = 0;
        for &child in scene.children(scene.root()) {
            self.draw_node(scene, child, 0, &mut row)?;
        }
        self.out.flush()
    }

    fn draw_node(&mut self, scene: &Scene, id: InstanceId, depth: u16, row: &mut u16) -> io::Result<()> {
        let Some(instance) = scene.get(id) else {
            return Ok(());
        };
        if !instance.common.visible {
            return Ok(());
        }

        queue!(
            self.out,
            cursor::MoveTo(depth * 2, *row),
            Print(format!("{}#{} ", instance.tag(), instance.identity()))
        )?;
        if let InstanceKind::Text(text) = &instance.kind {
            if let Some(fg) = text.fg {
                queue!(self.out, SetForegroundColor(fg.term()))?;
            }
            queue!(self.out, Print(&text.content), ResetColor)?;
        }
        *row += 1;

        for &child in scene.children(id) {
            self.draw_node(scene, child, depth + 1, row)?;
        }
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn request_render(&mut self, scene: &Scene) {
        if let Err(err) = self.draw(scene) {
            tracing::warn!(%err, "failed to draw frame");
        }
    }

    fn destroy(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn run(root: &mut Root<KeyedReconciler, TerminalSurface>) -> Result<(), Box<dyn Error>> {
    let mut count: i64 = 0;
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => count += 1,
            KeyCode::Down | KeyCode::Char('-') => count -= 1,
            KeyCode::Char('r') | KeyCode::Char('R') => count = 0,
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            _ => continue,
        }
        root.update(&[app(count)])?;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut root = Root::new(KeyedReconciler::new());
    root.mount(&[app(0)], TerminalSurface::enter()?)?;

    let outcome = run(&mut root);
    root.unmount()?;
    outcome
}
