//! Home rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::catalog::Catalog;
use crate::input::{is_narrow_layout, ClickState};
use crate::page::Page;
use crate::sections::LogEntry;
use crate::theme::{palette_for, FarmTheme, Palette, ALL_THEMES};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{build_strip, visible_runs};
use super::state::{HomeState, Overlay};
use super::MAX_FEATURED;

pub fn render(
    state: &HomeState,
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
        .constraints([
            Constraint::Length(4), // Hero
            Constraint::Min(8),    // Body
            Constraint::Length(5), // Log
        ])
        .split(area);

    render_hero(page, f, chunks[0], borders, &palette);
    match state.overlay {
        Some(Overlay::Lightbox(id)) => render_lightbox(&page.catalog, id, f, chunks[1], borders, click_state),
        Some(Overlay::Themes) => render_themes(page.session.theme, f, chunks[1], borders, &palette, click_state),
        None => render_body(state, &page.catalog, f, chunks[1], borders, &palette, click_state),
    }
    render_log(&state.log, f, chunks[2], borders);
}

fn render_hero(page: &Page, f: &mut Frame, area: Rect, borders: Borders, palette: &Palette) {
    let login = match &page.session.user {
        Some(name) => format!("管理員 {name} 已登入"),
        None => "訪客".to_string(),
    };
    let lines = vec![
        Line::from(Span::styled(
            "🌾 田園直送 · 產地新鮮直達餐桌",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("🎟 抵用券 {} 張", page.session.coupons.count()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(format!("   {login}"), Style::default().fg(Color::Gray)),
        ]),
    ];
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border));
    f.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

fn render_body(
    state: &HomeState,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Marquee
            Constraint::Length(3), // Controls
            Constraint::Min(3),    // Featured
        ])
        .split(area);

    render_marquee(state, catalog, f, chunks[0], borders, palette, click_state);

    let pause_label = if state.marquee.paused { " ▶ 播放 [p] " } else { " ⏸ 暫停 [p] " };
    let controls = TabBar::new("│")
        .tab(" ◀ [h] ", Style::default().fg(Color::Cyan), SCROLL_LEFT)
        .tab(pause_label, Style::default().fg(Color::Cyan), TOGGLE_PAUSE)
        .tab(" [l] ▶ ", Style::default().fg(Color::Cyan), SCROLL_RIGHT)
        .tab(" 🎨 主題 [t] ", Style::default().fg(palette.accent), OPEN_THEMES)
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(palette.border)),
        );
    {
        let mut cs = click_state.borrow_mut();
        controls.render(f, chunks[1], &mut cs);
    }

    let mut cl = ClickableList::new();
    for (i, product) in catalog.products().iter().take(MAX_FEATURED).enumerate() {
        let mut spans = vec![
            Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Gray)),
            Span::styled(product.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  NT$ {}", product.price),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if product.is_new {
            spans.push(Span::styled(" 新品", Style::default().fg(Color::LightRed)));
        }
        cl.push_clickable(Line::from(spans), FEATURED_BASE + i as u16);
    }
    if catalog.is_empty() {
        cl.push(Line::from(Span::styled(
            " 目前沒有精選商品",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(" 精選商品 ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(chunks[2], &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[2]);
}

fn render_marquee(
    state: &HomeState,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(" 本季推薦 ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let strip = build_strip(catalog);
    let mut cs = click_state.borrow_mut();
    for run in visible_runs(&strip, state.marquee.offset, inner.width) {
        let rect = Rect::new(inner.x + run.x, inner.y, run.width, 1);
        let style = match run.product {
            Some(_) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            None => Style::default().fg(Color::DarkGray),
        };
        f.render_widget(Paragraph::new(Line::from(Span::styled(run.text, style))), rect);
        if let Some(id) = run.product {
            cs.add_click_target(rect, STRIP_PRODUCT_BASE + id as u16);
        }
    }
}

fn render_lightbox(
    catalog: &Catalog,
    product_id: u32,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    match catalog.get(product_id) {
        Some(product) => {
            cl.push(Line::from(Span::styled(
                format!(" {}", product.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            cl.push(Line::from(Span::styled(
                format!(" 分類：{}", product.category.name()),
                Style::default().fg(Color::Gray),
            )));
            cl.push(Line::from(Span::styled(
                format!(" 售價：NT$ {}", product.price),
                Style::default().fg(Color::Yellow),
            )));
            if product.is_new {
                cl.push(Line::from(Span::styled(
                    " ★ 新品上市",
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                )));
            }
        }
        None => cl.push(Line::from(Span::styled(
            " 此商品已下架",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [x] 關閉", Style::default().fg(Color::DarkGray))),
        CLOSE_OVERLAY,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" 商品特寫 ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_themes(
    current: Option<FarmTheme>,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for (i, theme) in ALL_THEMES.iter().enumerate() {
        let marker = if current == Some(*theme) { "●" } else { " " };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{marker} {}", theme.name()),
                    Style::default().fg(theme.palette().accent),
                ),
            ]),
            THEME_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [x] 關閉", Style::default().fg(Color::DarkGray))),
        CLOSE_OVERLAY,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.accent))
        .title(" 背景主題 ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
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
