//! Admin rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::catalog::Catalog;
use crate::input::{is_narrow_layout, ClickState};
use crate::page::Page;
use crate::sections::LogEntry;
use crate::theme::{palette_for, Palette};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::display_value;
use super::state::{AdminState, Field, MAX_KEYED_ROWS};

pub fn render(
    state: &AdminState,
    active: Option<Field>,
    page: &Page,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let palette = palette_for(page.session.theme);
    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(area);

    match &page.session.user {
        Some(user) => render_panel(state, active, user, &page.catalog, f, chunks[0], borders, &palette, click_state),
        None => render_login(state, active, f, chunks[0], borders, &palette, click_state),
    }
    render_log(&state.log, f, chunks[1], borders);
}

/// One form row: label, value and a cursor when focused.
fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let (marker, style) = if focused {
        ("▸", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        (" ", Style::default().fg(Color::White))
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!(" {marker} {label}："), Style::default().fg(Color::Gray)),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn render_login(
    state: &AdminState,
    active: Option<Field>,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push_clickable(
        field_line("帳號", display_value(&state.username, false), active == Some(Field::Username)),
        FOCUS_USERNAME,
    );
    cl.push_clickable(
        field_line("密碼", display_value(&state.password, true), active == Some(Field::Password)),
        FOCUS_PASSWORD,
    );
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] 登入",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        SUBMIT_LOGIN,
    );
    cl.push(Line::from(Span::styled(
        " Enter 換下一欄 · Esc 清除",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            " 管理者登入 ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

#[allow(clippy::too_many_arguments)]
fn render_panel(
    state: &AdminState,
    active: Option<Field>,
    user: &str,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    // Add-product form
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(format!(" 👤 {user}  "), Style::default().fg(Color::LightGreen)),
            Span::styled("[o] 登出", Style::default().fg(Color::LightRed)),
        ]),
        LOGOUT,
    );
    cl.push_clickable(
        field_line("[n] 品名", state.draft.name.clone(), active == Some(Field::ProductName)),
        FOCUS_NAME,
    );
    cl.push_clickable(
        field_line("    價格", state.draft.price.clone(), active == Some(Field::ProductPrice)),
        FOCUS_PRICE,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled("   [c] 分類：", Style::default().fg(Color::Gray)),
            Span::styled(state.draft.category.name(), Style::default().fg(Color::Cyan)),
        ]),
        CYCLE_CATEGORY,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            " [a] 上架商品",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        SUBMIT_PRODUCT,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            " 新增商品 ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets_with_block(chunks[0], &block, &mut cs, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[0]);

    // Product list
    let mut cl = ClickableList::new();
    if catalog.is_empty() {
        cl.push(Line::from(Span::styled(
            " 目前沒有商品",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, product) in catalog.products().iter().enumerate() {
        let key = if i < MAX_KEYED_ROWS {
            format!("[{}]", i + 1)
        } else {
            "   ".to_string()
        };
        let mut spans = vec![
            Span::styled(format!(" {key} "), Style::default().fg(Color::Gray)),
            Span::styled(product.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  NT$ {}  {}", product.price, product.category.name()),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if product.is_new {
            spans.push(Span::styled(" 新品", Style::default().fg(Color::LightRed)));
        }
        spans.push(Span::styled("  下架", Style::default().fg(Color::LightRed)));
        cl.push_clickable(Line::from(spans), REMOVE_BASE + i as u16);
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" 商品列表 ({}) ", catalog.len()));
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(chunks[1], &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[1]);
}

fn render_log(log: &[LogEntry], f: &mut Frame, area: Rect, borders: Borders) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(max_lines);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|entry| {
            let color = if entry.is_important { Color::Yellow } else { Color::DarkGray };
            Line::from(Span::styled(format!(" > {}", entry.text), Style::default().fg(color)))
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" 紀錄 ");
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn focused_field_shows_cursor() {
        assert_eq!(text(&field_line("帳號", "ad".into(), true)), " ▸ 帳號：ad▏");
        assert_eq!(text(&field_line("帳號", "ad".into(), false)), "   帳號：ad");
    }
}
