//! Market rendering (read-only from state).

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
use crate::session::CouponBalance;
use crate::theme::{palette_for, Palette};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::cart::{display_total, COUPON_MIN_SUBTOTAL, COUPON_VALUE};
use super::state::{category_icon, filters, MarketState, PurchaseDraft, Screen, MAX_KEYED_ROWS};

pub fn render(
    state: &MarketState,
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
            Constraint::Min(10),   // Screen
            Constraint::Length(5), // Log
        ])
        .split(area);

    match state.screen {
        Screen::Catalog => render_catalog(state, &page.catalog, f, chunks[0], borders, &palette, click_state),
        Screen::Purchase(draft) => render_purchase(draft, &page.catalog, f, chunks[0], borders, click_state),
        Screen::Cart => render_cart(state, page.session.coupons, f, chunks[0], borders, &palette, click_state),
    }
    render_log(&state.log, f, chunks[1], borders);
}

/// Key label for the `i`-th row, matching the digit shortcuts.
fn row_key(i: usize) -> String {
    if i + 1 < MAX_KEYED_ROWS {
        format!("[{}]", i + 1)
    } else if i + 1 == MAX_KEYED_ROWS {
        "[0]".to_string()
    } else {
        "   ".to_string()
    }
}

// ── Catalog ────────────────────────────────────────────────────────────

fn render_catalog(
    state: &MarketState,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let mut tabs = TabBar::new("│");
    for (i, filter) in filters().into_iter().enumerate() {
        let style = if filter == state.filter {
            Style::default()
                .fg(Color::Black)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.accent)
        };
        tabs = tabs.tab(filter.name(), style, FILTER_BASE + i as u16);
    }
    let tab_block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(" 分類 (f) ");
    {
        let mut cs = click_state.borrow_mut();
        tabs.block(tab_block).render(f, chunks[0], &mut cs);
    }

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [c] 🛒 購物車 ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("({} 件)", state.cart.item_count()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        OPEN_CART,
    );
    cl.push(Line::from(""));

    let mut shown = 0;
    for (i, product) in catalog.visible(state.filter).enumerate() {
        let mut spans = vec![
            Span::styled(format!(" {} ", row_key(i)), Style::default().fg(Color::Gray)),
            Span::raw(format!("{} ", category_icon(product.category))),
            Span::styled(product.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  NT$ {}", product.price),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if product.is_new {
            spans.push(Span::styled(
                " 新品",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ));
        }
        cl.push_clickable(Line::from(spans), PRODUCT_BASE + i as u16);
        shown += 1;
    }
    if shown == 0 {
        cl.push(Line::from(Span::styled(
            " 此分類目前沒有商品",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            format!(" 農產市集 · {} ", state.filter.name()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(chunks[1], &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), chunks[1]);
}

// ── Purchase modal ─────────────────────────────────────────────────────

fn render_purchase(
    draft: PurchaseDraft,
    catalog: &Catalog,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    match catalog.get(draft.product_id) {
        Some(product) => {
            cl.push(Line::from(vec![
                Span::raw(format!(" {} ", category_icon(product.category))),
                Span::styled(
                    product.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  NT$ {} / 份", product.price),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
            cl.push(Line::from(Span::styled(
                format!(
                    " 小計 NT$ {}",
                    product.price.saturating_mul(draft.quantity)
                ),
                Style::default().fg(Color::Gray),
            )));
        }
        None => cl.push(Line::from(Span::styled(
            " 此商品已下架",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(format!(" [-] 減少      數量：{}", draft.quantity)),
        QTY_LESS,
    );
    cl.push_clickable(Line::from(" [+] 增加"), QTY_MORE);
    cl.push_clickable(
        Line::from(vec![
            Span::raw(" [s] 配送方式："),
            Span::styled(draft.shipping.label(), Style::default().fg(Color::Cyan)),
        ]),
        TOGGLE_SHIPPING,
    );
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [a] 加入購物車",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        CONFIRM_ADD,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [x] 取消", Style::default().fg(Color::DarkGray))),
        CLOSE_MODAL,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" 選購 ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Cart ───────────────────────────────────────────────────────────────

fn render_cart(
    state: &MarketState,
    coupons: CouponBalance,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    palette: &Palette,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let subtotal = state.cart.subtotal();

    if state.cart.is_empty() {
        cl.push(Line::from(Span::styled(
            " 購物車目前是空的",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, line) in state.cart.lines().iter().enumerate() {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {} ", row_key(i)), Style::default().fg(Color::Gray)),
                Span::styled(line.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!(" x{} ({})", line.quantity, line.shipping.label()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  NT$ {}", line.line_total()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("  移除", Style::default().fg(Color::LightRed)),
            ]),
            REMOVE_LINE_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));

    let check = if state.coupon_toggle { "☑" } else { "☐" };
    let coupon_style = if state.coupon_enabled {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(Span::styled(
            format!(
                " [u] {check} 使用抵用券折抵 NT$ {COUPON_VALUE}  (持有 {} 張)",
                coupons.count()
            ),
            coupon_style,
        )),
        TOGGLE_COUPON,
    );
    if !state.cart.is_empty() && subtotal < COUPON_MIN_SUBTOTAL {
        cl.push(Line::from(Span::styled(
            format!("   未達低消 NT$ {COUPON_MIN_SUBTOTAL}，無法使用抵用券"),
            Style::default().fg(Color::LightRed),
        )));
    }
    cl.push(Line::from(vec![
        Span::styled(" 總計: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("NT$ {}", display_total(subtotal, state.coupon_toggle)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [b] 結帳",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        CHECKOUT,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [x] 繼續購物", Style::default().fg(Color::DarkGray))),
        BACK_TO_CATALOG,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            " 購物車 ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Log ────────────────────────────────────────────────────────────────

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
    let inner = block.inner(area);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Wrapped entries can overflow; keep the newest one in view.
    let overflow = (paragraph.line_count(inner.width) as u16).saturating_sub(inner.height);
    f.render_widget(paragraph.block(block).scroll((overflow, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keys_match_digit_shortcuts() {
        assert_eq!(row_key(0), "[1]");
        assert_eq!(row_key(8), "[9]");
        assert_eq!(row_key(9), "[0]");
        assert_eq!(row_key(10), "   ");
    }
}
