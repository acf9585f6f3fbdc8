//! Slider form rendering — tracks, handles, tick marks, tooltips, alerts.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rangeform_core::config::{Orientation, SliderValue};
use rangeform_core::marks::Mark;

use crate::app::AppState;
use crate::theme;
use crate::widget::{ActiveHandle, DisplayValue, SliderView};

const TRACK_WIDTH: usize = 40;
const TRACK_HEIGHT: usize = 9;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "[j/k]field [h/l]adjust [Space]handle [Enter]commit [?]help",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for (i, field) in app.fields.iter().enumerate() {
        let focused = i == app.focused;
        let view = field.view(&app.store);
        push_field(&mut lines, &view, field.active_handle(), focused);
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn push_field(lines: &mut Vec<Line>, view: &SliderView, active: ActiveHandle, focused: bool) {
    let mut label = vec![Span::styled(
        view.label.clone(),
        if focused {
            theme::accent_bold()
        } else {
            theme::text()
        },
    )];
    if view.disabled {
        label.push(Span::styled(" (read-only)", theme::muted()));
    }
    lines.push(Line::from(label));

    match view.orientation {
        Orientation::Horizontal => push_horizontal(lines, view, active, focused),
        Orientation::Vertical => push_vertical(lines, view, active, focused),
    }

    if let Some(alert) = &view.alert {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("! {alert}"), theme::alert(view.hard_alert)),
        ]));
    }
}

fn push_horizontal(lines: &mut Vec<Line>, view: &SliderView, active: ActiveHandle, focused: bool) {
    let inactive = view.disabled || view.settings_error;
    let track_style = track_style(inactive, focused);

    let mut spans = vec![Span::raw("  "), Span::styled("[", theme::muted())];
    spans.extend(track_spans(view, active, focused && !inactive, track_style));
    spans.push(Span::styled("]", theme::muted()));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        value_text(view),
        if inactive { theme::muted() } else { theme::text() },
    ));
    if focused {
        if let Some(tip) = &view.tooltip {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("({tip})"), theme::neutral()));
        }
    }
    lines.push(Line::from(spans));

    if !view.marks.is_empty() {
        let (ticks, labels) = marks_rows(&view.marks, view.minimum, view.maximum, TRACK_WIDTH);
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(ticks, theme::muted()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(labels, theme::secondary()),
        ]));
    }
}

fn push_vertical(lines: &mut Vec<Line>, view: &SliderView, active: ActiveHandle, focused: bool) {
    let inactive = view.disabled || view.settings_error;
    let track_style = track_style(inactive, focused);
    let emphasize = focused && !inactive;

    // Row 0 is the maximum, the last row the minimum.
    let row_of = |v: f64| TRACK_HEIGHT - 1 - cell(fraction(v, view.minimum, view.maximum), TRACK_HEIGHT);

    let (upper_row, lower_row, lower_active) = match view.display {
        DisplayValue::Single(v) => {
            let row = row_of(v);
            (row, row, true)
        }
        DisplayValue::Range { lower, upper } => {
            (row_of(upper), row_of(lower), active == ActiveHandle::Lower)
        }
    };

    for row in 0..TRACK_HEIGHT {
        let mut spans = vec![Span::raw("  ")];
        let is_single = matches!(view.display, DisplayValue::Single(_));
        if row == upper_row || row == lower_row {
            let handle_active = if is_single || upper_row == lower_row {
                emphasize
            } else if row == lower_row {
                emphasize && lower_active
            } else {
                emphasize && !lower_active
            };
            spans.push(Span::styled("●", theme::handle(handle_active)));
        } else {
            // Filled below a single handle, or between the two handles.
            let filled = if is_single {
                row > lower_row
            } else {
                row > upper_row && row < lower_row
            };
            spans.push(Span::styled(
                if filled { "┃" } else { "│" },
                track_style,
            ));
        }

        // Annotations: the value at the handle row(s), mark labels elsewhere.
        if row == upper_row {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                value_text(view),
                if inactive { theme::muted() } else { theme::text() },
            ));
            if focused {
                if let Some(tip) = &view.tooltip {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(format!("({tip})"), theme::neutral()));
                }
            }
        } else if row != lower_row {
            if let Some(mark) = view.marks.iter().find(|m| row_of(m.position) == row) {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(mark.label.clone(), theme::secondary()));
            }
        }

        lines.push(Line::from(spans));
    }
}

fn track_style(inactive: bool, focused: bool) -> Style {
    if inactive {
        theme::muted()
    } else if focused {
        theme::accent()
    } else {
        theme::secondary()
    }
}

fn track_spans(
    view: &SliderView,
    active: ActiveHandle,
    emphasize: bool,
    track_style: Style,
) -> Vec<Span<'static>> {
    match view.display {
        DisplayValue::Single(v) => {
            let handle = cell(fraction(v, view.minimum, view.maximum), TRACK_WIDTH);
            vec![
                Span::styled("=".repeat(handle), track_style),
                Span::styled("●", theme::handle(emphasize)),
                Span::styled(" ".repeat(TRACK_WIDTH - 1 - handle), track_style),
            ]
        }
        DisplayValue::Range { lower, upper } => {
            let lo = cell(fraction(lower, view.minimum, view.maximum), TRACK_WIDTH);
            let hi = cell(fraction(upper, view.minimum, view.maximum), TRACK_WIDTH).max(lo);
            if lo == hi {
                return vec![
                    Span::raw(" ".repeat(lo)),
                    Span::styled("●", theme::handle(emphasize)),
                    Span::raw(" ".repeat(TRACK_WIDTH - 1 - lo)),
                ];
            }
            vec![
                Span::raw(" ".repeat(lo)),
                Span::styled("●", theme::handle(emphasize && active == ActiveHandle::Lower)),
                Span::styled("=".repeat(hi - lo - 1), track_style),
                Span::styled("●", theme::handle(emphasize && active == ActiveHandle::Upper)),
                Span::raw(" ".repeat(TRACK_WIDTH - 1 - hi)),
            ]
        }
    }
}

fn value_text(view: &SliderView) -> String {
    match view.display {
        DisplayValue::Single(v) => {
            if matches!(view.value, SliderValue::Single(Some(_))) {
                v.to_string()
            } else {
                "--".to_string()
            }
        }
        DisplayValue::Range { lower, upper } => {
            let (has_lower, has_upper) = match view.value {
                SliderValue::Range { lower, upper } => (lower.is_some(), upper.is_some()),
                SliderValue::Single(_) => (false, false),
            };
            let lower = if has_lower { lower.to_string() } else { "--".into() };
            let upper = if has_upper { upper.to_string() } else { "--".into() };
            format!("{lower} .. {upper}")
        }
    }
}

/// Relative position of a value on the track, clamped to [0, 1].
fn fraction(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Map a fraction onto a cell index in [0, width).
fn cell(frac: f64, width: usize) -> usize {
    (frac * (width - 1) as f64).round() as usize
}

/// Tick row and label row aligned under a horizontal track. Labels center
/// on their tick and are skipped when they would collide.
fn marks_rows(marks: &[Mark], min: f64, max: f64, width: usize) -> (String, String) {
    let mut ticks = vec![' '; width];
    let mut labels = vec![' '; width + 8];

    for mark in marks {
        let col = cell(fraction(mark.position, min, max), width);
        ticks[col] = '┴';

        let chars: Vec<char> = mark.label.chars().collect();
        let start = col
            .saturating_sub(chars.len() / 2)
            .min(labels.len().saturating_sub(chars.len()));
        let guard_start = start.saturating_sub(1);
        let guard_end = (start + chars.len() + 1).min(labels.len());
        if labels[guard_start..guard_end].iter().any(|c| *c != ' ') {
            continue;
        }
        for (i, ch) in chars.iter().enumerate() {
            labels[start + i] = *ch;
        }
    }

    (
        ticks.into_iter().collect::<String>().trim_end().to_string(),
        labels.into_iter().collect::<String>().trim_end().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_and_scales() {
        assert_eq!(fraction(0.0, 0.0, 100.0), 0.0);
        assert_eq!(fraction(50.0, 0.0, 100.0), 0.5);
        assert_eq!(fraction(150.0, 0.0, 100.0), 1.0);
        assert_eq!(fraction(-10.0, 0.0, 100.0), 0.0);
        // Degenerate span pins everything to the left edge.
        assert_eq!(fraction(5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn cells_cover_the_full_width() {
        assert_eq!(cell(0.0, 40), 0);
        assert_eq!(cell(1.0, 40), 39);
        assert_eq!(cell(0.5, 41), 20);
    }

    #[test]
    fn mark_rows_align_ticks_and_labels() {
        let marks = vec![
            Mark {
                position: 0.0,
                label: "0".into(),
            },
            Mark {
                position: 50.0,
                label: "50".into(),
            },
            Mark {
                position: 100.0,
                label: "100".into(),
            },
        ];
        let (ticks, labels) = marks_rows(&marks, 0.0, 100.0, 41);
        assert_eq!(ticks.chars().next(), Some('┴'));
        assert_eq!(ticks.chars().nth(20), Some('┴'));
        assert_eq!(ticks.chars().nth(40), Some('┴'));
        assert!(labels.starts_with('0'));
        assert!(labels.contains("50"));
        assert!(labels.contains("100"));
    }

    #[test]
    fn colliding_labels_are_skipped() {
        let marks = vec![
            Mark {
                position: 0.0,
                label: "1000".into(),
            },
            Mark {
                position: 2.0,
                label: "1002".into(),
            },
        ];
        let (_, labels) = marks_rows(&marks, 0.0, 100.0, 40);
        assert!(labels.contains("1000"));
        assert!(!labels.contains("1002"));
    }
}
