//! Happy Farm rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::page::Page;
use crate::sections::LogEntry;
use crate::theme::{palette_for, Palette};
use crate::widgets::ClickableList;

use super::actions::*;
use super::state::{
    Disaster, FarmItem, FarmPhase, FarmState, Overlay, FERTILIZER_DAILY_CAP, FORCE_HARVEST_REWARD,
    GROW_WATER_COST, HARVEST_REWARD, LAST_DAY, MAX_PROGRESS, MAX_STAMINA, MAX_WATER,
    WATER_REFILL_COST,
};
use super::{FarmSection, COUPON_GIFT_MESSAGE};

pub fn render(
    section: &FarmSection,
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
            Constraint::Length(6), // Status
            Constraint::Min(11),   // Field / overlay
            Constraint::Length(6), // Log
        ])
        .split(area);

    render_status(&section.state, f, chunks[0], borders, &palette);
    match (section.overlay, section.state.phase) {
        (Some(Overlay::Tutorial), _) => render_tutorial(f, chunks[1], borders, click_state),
        (Some(Overlay::Shop), _) => render_shop(section, f, chunks[1], borders, click_state),
        (None, FarmPhase::Forecast) => render_forecast(&section.state, f, chunks[1], borders, click_state),
        (None, FarmPhase::GameOver) => render_report(section, f, chunks[1], borders, click_state),
        (None, FarmPhase::Playing) => render_field(&section.state, f, chunks[1], borders, click_state),
    }
    render_log(&section.log, f, chunks[2], borders);
}

fn gauge(value: u32, max: u32, width: usize) -> String {
    let filled = ((value.min(max) as usize) * width + max as usize / 2) / max.max(1) as usize;
    "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
}

fn disaster_color(d: Disaster) -> Color {
    match d {
        Disaster::Typhoon => Color::LightBlue,
        Disaster::Pest => Color::LightRed,
        Disaster::Market => Color::Yellow,
    }
}

// ── Status ─────────────────────────────────────────────────────────────

fn render_status(state: &FarmState, f: &mut Frame, area: Rect, borders: Borders, palette: &Palette) {
    let label = Style::default().fg(Color::Gray);
    let stamina = "⚡".repeat(state.stamina as usize)
        + &"·".repeat(MAX_STAMINA.saturating_sub(state.stamina) as usize);

    let weather = match state.active_disaster {
        Some(d) => Span::styled(format!("今日：{}", d.name()), Style::default().fg(disaster_color(d))),
        None => Span::styled("今日：風平浪靜", Style::default().fg(Color::Green)),
    };
    let shield = if state.is_protected {
        Span::styled("  🛡 已噴除蟲劑", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" 天數: ", label),
            Span::styled(
                format!("{}/{}", state.day, LAST_DAY),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  資金: ", label),
            Span::styled(
                format!("${}", state.money),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  體力: ", label),
            Span::styled(stamina, Style::default().fg(Color::LightYellow)),
        ]),
        Line::from(vec![
            Span::styled(" 水分 ", label),
            Span::styled(gauge(state.water, MAX_WATER, 16), Style::default().fg(Color::LightBlue)),
            Span::styled(format!(" {}%", state.water), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" 生長 ", label),
            Span::styled(gauge(state.progress, MAX_PROGRESS, 16), Style::default().fg(Color::LightGreen)),
            Span::styled(format!(" {}%", state.progress), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![Span::raw(" "), weather, shield]),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            " 開心農場 ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Field ──────────────────────────────────────────────────────────────

fn crop_art(progress: u32) -> [&'static str; 3] {
    if progress >= MAX_PROGRESS {
        ["  🌾🌾🌾🌾  ", "  🌾🌾🌾🌾  ", " ▀▀▀▀▀▀▀▀▀ "]
    } else if progress > 0 {
        ["            ", "  🌱 🌱 🌱  ", " ▀▀▀▀▀▀▀▀▀ "]
    } else {
        ["            ", "  .  .  .   ", " ▀▀▀▀▀▀▀▀▀ "]
    }
}

fn render_field(
    state: &FarmState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (art_area, action_area) = if is_narrow_layout(area.width) {
        (None, area)
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(30)])
            .split(area);
        (Some(h[0]), h[1])
    };

    if let Some(art_area) = art_area {
        let soil = Style::default().fg(Color::Rgb(160, 110, 60));
        let lines: Vec<Line> = std::iter::once(Line::from(""))
            .chain(crop_art(state.progress).iter().map(|row| Line::from(Span::styled(*row, soil))))
            .collect();
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" 田地 ");
        f.render_widget(Paragraph::new(lines).block(block), art_area);
    }

    let active = Style::default().fg(Color::White);
    let dim = Style::default().fg(Color::DarkGray);
    let tired = state.stamina == 0;

    let mut cl = ClickableList::new();
    let primary = if state.is_harvest_ready() {
        Line::from(Span::styled(
            format!(" [1] 收穫 (+${HARVEST_REWARD})"),
            if tired { dim } else { Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD) },
        ))
    } else {
        Line::from(Span::styled(
            format!(" [1] 播種/照料 (水-{GROW_WATER_COST} | 體力-1)"),
            if tired { dim } else { active },
        ))
    };
    cl.push_clickable(primary, PRIMARY_ACTION);

    if state.can_force_harvest() {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [2] 強制收成 (+${FORCE_HARVEST_REWARD}，進度歸零)"),
                if tired { dim } else { Style::default().fg(Color::LightRed) },
            )),
            FORCE_HARVEST,
        );
    }

    let water_full = state.water >= MAX_WATER;
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [3] 補水 (${WATER_REFILL_COST})"),
            if water_full { dim } else { active },
        )),
        REFILL_WATER,
    );

    let fert = state.inventory.fertilizer;
    cl.push_clickable(
        Line::from(Span::styled(
            format!(
                " [4] 使用肥料 x{}  (今日 {}/{})",
                fert, state.daily_fertilizer_use, FERTILIZER_DAILY_CAP
            ),
            if fert == 0 || state.daily_fertilizer_use >= FERTILIZER_DAILY_CAP { dim } else { active },
        )),
        USE_FERTILIZER,
    );

    let pest = state.inventory.pesticide;
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [5] 使用除蟲劑 x{}", pest),
            if pest == 0 { dim } else { active },
        )),
        USE_PESTICIDE,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [6] 農資商店", Style::default().fg(Color::Cyan))),
        OPEN_SHOP,
    );
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [0] 結束這一天",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        END_TURN,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [?] 遊戲說明", dim)),
        OPEN_TUTORIAL,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(" 行動 ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(action_area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), action_area);
}

// ── Shop ───────────────────────────────────────────────────────────────

fn render_shop(
    section: &FarmSection,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let money = section.state.money;
    let mut cl = ClickableList::new();

    let rows = [
        (FarmItem::Fertilizer, ['1', '2', '3'], [FERTILIZER_LESS, FERTILIZER_MORE, BUY_FERTILIZER]),
        (FarmItem::Pesticide, ['4', '5', '6'], [PESTICIDE_LESS, PESTICIDE_MORE, BUY_PESTICIDE]),
    ];
    for (item, keys, ids) in rows {
        let qty = section.order.quantity(item);
        let cost = item.price() * qty;
        let effect = match item {
            FarmItem::Fertilizer => "生長 +5，每日最多 5 次",
            FarmItem::Pesticide => "抵禦一次蟲害",
        };
        cl.push(Line::from(vec![
            Span::styled(
                format!(" {} ${}/個", item.name(), item.price()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  庫存 {}  ({effect})", section.state.inventory.count(item)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        cl.push_clickable(Line::from(format!("   [{}] 數量 −   目前 {qty}", keys[0])), ids[0]);
        cl.push_clickable(Line::from(format!("   [{}] 數量 +", keys[1])), ids[1]);
        let buy_style = if money >= cost {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(Span::styled(format!("   [{}] 購買 (共 ${cost})", keys[2]), buy_style)),
            ids[2],
        );
        cl.push(Line::from(""));
    }
    cl.push_clickable(
        Line::from(Span::styled(" [x] 離開商店", Style::default().fg(Color::Cyan))),
        CLOSE_OVERLAY,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" 農資商店  資金 ${money} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Forecast ───────────────────────────────────────────────────────────

fn render_forecast(
    state: &FarmState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" 第 {} 天的夜晚...", state.day),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    if let Some(next) = state.next_disaster {
        cl.push(Line::from(Span::styled(
            format!(" {}", next.omen()),
            Style::default().fg(disaster_color(next)).add_modifier(Modifier::BOLD),
        )));
    }
    cl.push(Line::from(""));
    let label = if state.day >= LAST_DAY {
        " [Enter] 結算成績"
    } else {
        " [Enter] 迎接明天"
    };
    cl.push_clickable(
        Line::from(Span::styled(label, Style::default().fg(Color::Yellow))),
        CONFIRM_FORECAST,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" 預兆 ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Game over ──────────────────────────────────────────────────────────

fn render_report(
    section: &FarmSection,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    if let Some(report) = section.report {
        let rank_color = match report.rank.letter() {
            "S" => Color::LightMagenta,
            "A" => Color::LightRed,
            "B" => Color::LightBlue,
            _ => Color::Gray,
        };
        cl.push(Line::from(vec![
            Span::styled(" 最終資金: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("${}", report.money),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        cl.push(Line::from(vec![
            Span::styled(" 評價: ", Style::default().fg(Color::Gray)),
            Span::styled(
                report.rank.letter(),
                Style::default().fg(rank_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", report.rank.comment()), Style::default().fg(Color::White)),
        ]));
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!(" 🎁 {COUPON_GIFT_MESSAGE}"),
            Style::default().fg(Color::LightGreen),
        )));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [r] 重新開始", Style::default().fg(Color::Yellow))),
        RESTART,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " 遊戲結束 ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Tutorial ───────────────────────────────────────────────────────────

const TUTORIAL: &[&str] = &[
    " 遊戲共 10 天，每天有 3 點體力。",
    " 播種/照料：消耗 20 水分與 1 體力，生長 +34。",
    " 生長達 100% 即可收穫 $1000，市場波動日可得 $1500。",
    " 水分不會隔天恢復，補水一次 $500。",
    " 肥料每次 +5 生長，每天最多 5 次。",
    " 蟲害日結束前沒有噴除蟲劑，作物會全毀。",
    " 颱風日結束時田裡有作物就會被吹毀，可先強制收成 ($500)。",
    " 第 10 天結束後依資金評價，並獲得 100 元抵用券一張。",
];

fn render_tutorial(f: &mut Frame, area: Rect, borders: Borders, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    for line in TUTORIAL {
        cl.push(Line::from(Span::styled(*line, Style::default().fg(Color::White))));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] 關閉", Style::default().fg(Color::Cyan))),
        CLOSE_OVERLAY,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 遊戲說明 ");

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
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
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
    fn gauge_fills_proportionally() {
        assert_eq!(gauge(0, 100, 4), "░░░░");
        assert_eq!(gauge(50, 100, 4), "██░░");
        assert_eq!(gauge(100, 100, 4), "████");
        assert_eq!(gauge(250, 100, 4), "████");
    }

    #[test]
    fn crop_art_tracks_growth() {
        assert_ne!(crop_art(0), crop_art(34));
        assert_ne!(crop_art(34), crop_art(100));
        assert_eq!(crop_art(34), crop_art(99));
    }
}
