mod app;
mod catalog;
mod input;
mod page;
mod prompt;
mod sections;
mod session;
mod storage;
mod theme;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use app::App;
use input::{pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::GameTime;

/// Marquee ticks per second.
const TICKS_PER_SEC: u32 = 8;

/// Query the grid container's bounding rect and convert a pixel position to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

fn key_to_event(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Esc => Some(InputEvent::Esc),
        KeyCode::Tab => Some(InputEvent::Tab),
        _ => None,
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(App::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let game_time = Rc::new(RefCell::new(GameTime::new(TICKS_PER_SEC)));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            web_sys::console::log_1(&format!("click: col={col}, row={row}, action={action:?}").into());

            if let Some(id) = action {
                app.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            if let Some(event) = key_to_event(key_event.code) {
                app.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let delta = game_time.borrow_mut().update(now_ms());
            let mut app = app.borrow_mut();
            app.tick(delta);

            let size = f.area();
            click_state.borrow_mut().begin_frame(size.width, size.height);
            app.render(f, size, &click_state);
        }
    });

    Ok(())
}
