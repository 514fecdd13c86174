//! Marquee motion and strip layout.
//!
//! The strip is every catalog product's label followed by a separator. It is
//! drawn as if repeated end to end, so the offset only ever needs to cover
//! one copy.

use ratzilla::ratatui::text::Span;

use crate::catalog::Catalog;

use super::state::{HomeState, Marquee, Overlay, ITEM_SEPARATOR, MANUAL_STEP, MARQUEE_SPEED};

/// One character of the strip, tagged with the product it belongs to
/// (`None` for separators).
pub type StripChar = (char, Option<u32>);

pub fn build_strip(catalog: &Catalog) -> Vec<StripChar> {
    let mut strip = Vec::new();
    for product in catalog.products() {
        let label = format!("{} NT${}", product.name, product.price);
        strip.extend(label.chars().map(|c| (c, Some(product.id))));
        strip.extend(ITEM_SEPARATOR.chars().map(|c| (c, None)));
    }
    strip
}

/// Length of one copy of the strip in characters.
pub fn copy_len(strip: &[StripChar]) -> u32 {
    strip.len() as u32
}

pub fn tick(marquee: &mut Marquee, delta_ticks: u32, copy_len: u32) {
    if marquee.paused || copy_len == 0 || delta_ticks == 0 {
        return;
    }
    for _ in 0..delta_ticks {
        marquee.offset += MARQUEE_SPEED;
        if marquee.offset >= copy_len {
            marquee.offset = 0;
        }
    }
}

/// Step back. Going below zero first jumps forward one copy.
pub fn scroll_left(marquee: &mut Marquee, copy_len: u32) {
    if copy_len == 0 {
        return;
    }
    let mut current = marquee.offset;
    if current < MANUAL_STEP {
        current += copy_len;
    }
    // A strip shorter than one step still has to land inside a copy.
    marquee.offset = current.saturating_sub(MANUAL_STEP) % copy_len;
}

/// Step forward. Passing the end of a copy wraps back by one copy.
pub fn scroll_right(marquee: &mut Marquee, copy_len: u32) {
    if copy_len == 0 {
        return;
    }
    let mut target = marquee.offset + MANUAL_STEP;
    if target >= copy_len {
        target -= copy_len;
    }
    marquee.offset = target % copy_len;
}

pub fn toggle_pause(marquee: &mut Marquee) {
    marquee.paused = !marquee.paused;
}

/// Enlarge a product. The marquee holds still while the lightbox is open.
pub fn open_lightbox(state: &mut HomeState, product_id: u32) {
    state.overlay = Some(Overlay::Lightbox(product_id));
    state.marquee.paused = true;
}

pub fn close_overlay(state: &mut HomeState) {
    if let Some(Overlay::Lightbox(_)) = state.overlay {
        state.marquee.paused = false;
    }
    state.overlay = None;
}

/// A run of same-product characters placed on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub product: Option<u32>,
    /// Column relative to the strip's left edge.
    pub x: u16,
    pub width: u16,
}

fn cell_width(c: char) -> u16 {
    Span::raw(c.to_string()).width() as u16
}

/// The part of the endless strip visible through a `width`-cell window
/// starting at `offset`.
pub fn visible_runs(strip: &[StripChar], offset: u32, width: u16) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut used = 0u16;
    let limit = strip.len() + width as usize;
    for &(c, product) in strip.iter().cycle().skip(offset as usize).take(limit) {
        let w = cell_width(c);
        if used + w > width {
            break;
        }
        match runs.last_mut() {
            Some(run) if run.product == product => {
                run.text.push(c);
                run.width += w;
            }
            _ => runs.push(Run {
                text: c.to_string(),
                product,
                x: used,
                width: w,
            }),
        }
        used += w;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(len: usize) -> Vec<StripChar> {
        (0..len).map(|i| ('a', Some(i as u32 / 4))).collect()
    }

    #[test]
    fn tick_wraps_at_one_copy() {
        let mut m = Marquee { offset: 8, paused: false };
        tick(&mut m, 1, 10);
        assert_eq!(m.offset, 9);
        tick(&mut m, 1, 10);
        assert_eq!(m.offset, 0);
    }

    #[test]
    fn paused_marquee_holds() {
        let mut m = Marquee { offset: 3, paused: true };
        tick(&mut m, 50, 10);
        assert_eq!(m.offset, 3);
    }

    #[test]
    fn left_from_start_jumps_into_copy() {
        let mut m = Marquee::default();
        scroll_left(&mut m, 100);
        assert_eq!(m.offset, 100 - MANUAL_STEP);
        scroll_left(&mut m, 100);
        assert_eq!(m.offset, 100 - 2 * MANUAL_STEP);
    }

    #[test]
    fn right_past_end_wraps_back() {
        let mut m = Marquee { offset: 95, paused: false };
        scroll_right(&mut m, 100);
        assert_eq!(m.offset, 95 + MANUAL_STEP - 100);
        scroll_right(&mut m, 100);
        assert_eq!(m.offset, 95 + 2 * MANUAL_STEP - 100);
    }

    #[test]
    fn scroll_stays_inside_short_strip() {
        let mut m = Marquee::default();
        scroll_left(&mut m, 5);
        assert!(m.offset < 5);
        scroll_right(&mut m, 5);
        assert!(m.offset < 5);
    }

    #[test]
    fn lightbox_pauses_and_close_resumes() {
        let mut s = HomeState::new();
        open_lightbox(&mut s, 3);
        assert!(s.marquee.paused);
        close_overlay(&mut s);
        assert!(!s.marquee.paused);
        assert_eq!(s.overlay, None);
    }

    #[test]
    fn closing_theme_picker_keeps_manual_pause() {
        let mut s = HomeState::new();
        s.marquee.paused = true;
        s.overlay = Some(Overlay::Themes);
        close_overlay(&mut s);
        assert!(s.marquee.paused);
    }

    #[test]
    fn runs_group_by_product_and_wrap() {
        let runs = visible_runs(&strip(8), 6, 6);
        let products: Vec<_> = runs.iter().map(|r| r.product).collect();
        assert_eq!(products, [Some(1), Some(0)]);
        assert_eq!((runs[0].x, runs[0].width), (0, 2));
        assert_eq!((runs[1].x, runs[1].width), (2, 4));
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let s: Vec<StripChar> = "菜a".chars().map(|c| (c, Some(0))).collect();
        let runs = visible_runs(&s, 0, 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "菜a菜");
        assert_eq!(runs[0].width, 5);
    }

    #[test]
    fn empty_strip_draws_nothing() {
        assert!(visible_runs(&[], 0, 40).is_empty());
    }

    #[test]
    fn strip_tags_labels_and_separators() {
        let catalog = Catalog::from_json(
            r#"{"products":[{"name":"米","price":5,"category":"grain"}]}"#,
        )
        .unwrap();
        let strip = build_strip(&catalog);
        let label: String = strip.iter().filter(|(_, p)| p.is_some()).map(|(c, _)| c).collect();
        assert_eq!(label, "米 NT$5");
        assert_eq!(copy_len(&strip) as usize, label.chars().count() + ITEM_SEPARATOR.chars().count());
    }
}
