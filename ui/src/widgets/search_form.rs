//! egui rendering of a [`SearchForm`].
//!
//! Fields are laid out on the form's 24-unit grid: each visible field takes
//! its grid span, rows wrap when full, and the 查询/重置/展开 group fills the
//! rest of the last row so it ends flush right.
//!
//! Edits and button clicks are collected while the form is drawn and applied
//! to the form afterwards.

use std::mem;

use egui::text::LayoutJob;
use egui::{
    Align, Button, ComboBox, Layout, RichText, Slider, TextEdit, TextFormat, TextStyle, Ui, vec2,
};
use ustr::Ustr;
use yishan_business::search::{
    GRID_COLUMNS, InputKind, LabelWidth, LayoutMode, SearchField, SearchForm,
};
use yishan_business::{FieldValue, FilterCriteria, FormError};

use crate::utils::colors::COLOR_RED;
use crate::utils::file_picker::{FilePicker, SystemFilePicker};

const FIELD_SPACING: f32 = 16.0;
const ROW_SPACING: f32 = 12.0;
const DEFAULT_TEXTAREA_ROWS: usize = 3;
const DEFAULT_RANGE: (f64, f64) = (0.0, 100.0);
const HEX_INPUT_WIDTH: f32 = 80.0;

/// What the user did with the form this frame.
#[derive(Debug, Default)]
pub struct SearchFormResponse {
    /// Outcome of a 查询 click: the submitted criteria, or why it was blocked.
    pub submitted: Option<Result<FilterCriteria, FormError>>,
    pub reset: bool,
    /// Collapse state requested by the 展开/收起 toggle.
    pub toggled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Field { index: usize, span: u8 },
    Actions { span: u8 },
}

#[derive(Debug, Default, Clone, Copy)]
struct ButtonClicks {
    search: bool,
    reset: bool,
    toggle: bool,
}

/// Draws `form` using the system file dialog for file fields.
pub fn search_form(ui: &mut Ui, form: &mut SearchForm) -> SearchFormResponse {
    search_form_with_picker(ui, form, &SystemFilePicker)
}

/// Draws `form`, picking files for file fields through `picker`.
pub fn search_form_with_picker(
    ui: &mut Ui,
    form: &mut SearchForm,
    picker: &dyn FilePicker,
) -> SearchFormResponse {
    let mut measure = || Some(ui.available_width());
    if form.observe_width(&mut measure) {
        log::debug!("search form width now {}", form.container_width());
    }

    let grid = form.grid();
    let fields: Vec<SearchField> = form.visible_fields().to_vec();
    let spans: Vec<u8> = fields.iter().map(|field| grid.field_span(field.col_size)).collect();
    let rows = plan_rows(&spans, form.action_span());
    let vertical = grid.effective_mode == LayoutMode::Vertical;
    let unit = ui.available_width() / f32::from(GRID_COLUMNS);
    let cell_width = |span: u8| (unit * f32::from(span) - FIELD_SPACING).max(0.0);

    let mut edits: Vec<(Ustr, FieldValue)> = Vec::new();
    let mut clicks = ButtonClicks::default();

    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            if form.config().split {
                ui.separator();
            } else {
                ui.add_space(ROW_SPACING);
            }
        }

        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = FIELD_SPACING;
            for slot in row {
                match *slot {
                    Slot::Field { index, span } => {
                        let field = &fields[index];
                        let width = cell_width(span);
                        ui.allocate_ui_with_layout(
                            vec2(width, ui.available_height()),
                            Layout::top_down(Align::Min),
                            |ui| {
                                ui.set_width(width);
                                let edited = field_cell(ui, form, field, vertical, picker);
                                if let Some(value) = edited {
                                    edits.push((field.key, value));
                                }
                            },
                        );
                    }
                    Slot::Actions { span } => {
                        let width = cell_width(span);
                        ui.allocate_ui_with_layout(
                            vec2(width, ui.available_height()),
                            Layout::right_to_left(Align::Min),
                            |ui| {
                                ui.set_width(width);
                                clicks = action_buttons(ui, form);
                            },
                        );
                    }
                }
            }
        });
    }

    for (key, value) in edits {
        form.set_value(&key, value);
    }

    let mut response = SearchFormResponse::default();
    if clicks.search {
        response.submitted = Some(form.submit());
    }
    if clicks.reset {
        form.reset();
        response.reset = true;
    }
    if clicks.toggle {
        response.toggled = Some(form.toggle_collapsed());
    }
    response
}

/// Splits the visible fields into grid rows and appends the action group.
///
/// The action group takes whatever is left of the last row, or a row of its
/// own when less than `action_span` units remain.
fn plan_rows(field_spans: &[u8], action_span: u8) -> Vec<Vec<Slot>> {
    let mut rows = Vec::new();
    let mut current = Vec::new();
    let mut used: u8 = 0;

    for (index, span) in field_spans.iter().enumerate() {
        let span = (*span).clamp(1, GRID_COLUMNS);
        if used + span > GRID_COLUMNS && !current.is_empty() {
            rows.push(mem::take(&mut current));
            used = 0;
        }
        current.push(Slot::Field { index, span });
        used += span;
    }

    let action_span = action_span.clamp(1, GRID_COLUMNS);
    if used + action_span > GRID_COLUMNS && !current.is_empty() {
        rows.push(mem::take(&mut current));
        used = 0;
    }
    current.push(Slot::Actions {
        span: GRID_COLUMNS - used,
    });
    rows.push(current);
    rows
}

/// The 查询/重置/展开 group, drawn right to left.
fn action_buttons(ui: &mut Ui, form: &SearchForm) -> ButtonClicks {
    let enabled = !form.is_loading();
    let mut clicks = ButtonClicks::default();

    if form.has_more_fields() {
        let label = if form.is_collapsed() { "展开 ▼" } else { "收起 ▲" };
        clicks.toggle = ui.button(label).clicked();
    }
    clicks.reset = ui.add_enabled(enabled, Button::new("重置")).clicked();
    clicks.search = ui.add_enabled(enabled, Button::new("查询")).clicked();
    if !enabled {
        ui.spinner();
    }
    clicks
}

/// Label, input and inline error of one field. Returns the edited value.
fn field_cell(
    ui: &mut Ui,
    form: &SearchForm,
    field: &SearchField,
    vertical: bool,
    picker: &dyn FilePicker,
) -> Option<FieldValue> {
    let empty = FieldValue::default();
    let value = form.value(&field.key).unwrap_or(&empty);
    let show_mark = field.required && !form.config().hide_required_mark;

    let edited = if vertical {
        ui.label(field_label(ui, field, show_mark));
        input(ui, field, value, picker)
    } else {
        ui.horizontal_top(|ui| {
            label_area(ui, field, show_mark, form.config().label_width);
            ui.vertical(|ui| input(ui, field, value, picker)).inner
        })
        .inner
    };

    if let Some(error) = form.error(&field.key) {
        ui.label(RichText::new(error).color(COLOR_RED).small());
    }
    edited
}

fn label_area(ui: &mut Ui, field: &SearchField, show_mark: bool, width: LabelWidth) {
    let label = field_label(ui, field, show_mark);
    match width {
        LabelWidth::Px(px) => {
            ui.allocate_ui_with_layout(
                vec2(px, ui.spacing().interact_size.y),
                Layout::right_to_left(Align::Center),
                |ui| {
                    ui.set_width(px);
                    ui.label(label);
                },
            );
        }
        LabelWidth::Auto => {
            ui.label(label);
        }
    }
}

pub(super) fn field_label(ui: &Ui, field: &SearchField, show_mark: bool) -> LayoutJob {
    let font = TextStyle::Body.resolve(ui.style());
    let mut job = LayoutJob::default();
    if show_mark {
        job.append("*", 0.0, TextFormat::simple(font.clone(), COLOR_RED));
    }
    job.append(
        &format!("{}：", field.label),
        0.0,
        TextFormat::simple(font, ui.visuals().text_color()),
    );
    job
}

pub(super) fn input(
    ui: &mut Ui,
    field: &SearchField,
    value: &FieldValue,
    picker: &dyn FilePicker,
) -> Option<FieldValue> {
    ui.add_enabled_ui(!field.disabled, |ui| match field.input_kind {
        InputKind::Select => select_input(ui, field, value),
        InputKind::Textarea => textarea_input(ui, field, value),
        InputKind::Checkbox => checkbox_input(ui, field, value),
        InputKind::Radio => radio_input(ui, field, value),
        InputKind::File => file_input(ui, field, value, picker),
        InputKind::Range => range_input(ui, field, value),
        InputKind::Color => color_input(ui, field, value),
        InputKind::Number => number_input(ui, field, value),
        _ => text_input(ui, field, value),
    })
    .inner
}

/// Format hint appended to the placeholder of date and time inputs.
fn format_hint(kind: InputKind) -> Option<&'static str> {
    match kind {
        InputKind::Date => Some("YYYY-MM-DD"),
        InputKind::DateTimeLocal => Some("YYYY-MM-DD HH:mm"),
        InputKind::Time => Some("HH:mm:ss"),
        InputKind::Month => Some("YYYY-MM"),
        InputKind::Week => Some("YYYY-Www"),
        _ => None,
    }
}

fn hint_text(field: &SearchField) -> String {
    let placeholder = field.placeholder_text();
    match format_hint(field.input_kind) {
        Some(format) if field.placeholder.is_none() => format!("{placeholder}（{format}）"),
        _ => placeholder,
    }
}

fn text_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let mut text = value.as_text().unwrap_or_default().to_owned();
    let edit = TextEdit::singleline(&mut text)
        .hint_text(hint_text(field))
        .password(field.input_kind == InputKind::Password)
        .interactive(!field.read_only)
        .desired_width(f32::INFINITY);
    ui.add(edit).changed().then(|| FieldValue::Text(text))
}

fn number_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let mut text = value.as_text().unwrap_or_default().to_owned();
    let hint = match (field.min, field.max) {
        (Some(min), Some(max)) => format!(
            "{}（{}-{}）",
            field.placeholder_text(),
            format_number(min),
            format_number(max)
        ),
        _ => field.placeholder_text(),
    };
    let edit = TextEdit::singleline(&mut text)
        .hint_text(hint)
        .interactive(!field.read_only)
        .desired_width(f32::INFINITY);
    if !ui.add(edit).changed() {
        return None;
    }
    text.retain(|c| c.is_ascii_digit() || matches!(c, '.' | '-'));
    Some(FieldValue::Text(text))
}

fn textarea_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let mut text = value.as_text().unwrap_or_default().to_owned();
    let edit = TextEdit::multiline(&mut text)
        .desired_rows(field.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS))
        .hint_text(field.placeholder_text())
        .interactive(!field.read_only)
        .desired_width(f32::INFINITY);
    ui.add(edit).changed().then(|| FieldValue::Text(text))
}

fn select_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let current = value.as_text().unwrap_or_default();
    let selected_text = field
        .options
        .iter()
        .find(|option| option.value == current)
        .map_or_else(
            || RichText::new(field.placeholder_text()).weak(),
            |option| RichText::new(&option.label),
        );

    let mut choice = current.to_owned();
    ComboBox::from_id_salt(("search_select", field.key.as_str()))
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(
                &mut choice,
                String::new(),
                RichText::new(field.placeholder_text()).weak(),
            );
            for option in &field.options {
                ui.selectable_value(&mut choice, option.value.clone(), &option.label);
            }
        });
    (choice != current).then(|| FieldValue::Text(choice))
}

fn checkbox_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let mut checked = matches!(value, FieldValue::Flag(true));
    let text = field.placeholder.as_deref().unwrap_or(&field.label);
    ui.checkbox(&mut checked, text)
        .changed()
        .then_some(FieldValue::Flag(checked))
}

fn radio_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let current = value.as_text().unwrap_or_default();
    let mut choice = current.to_owned();
    ui.horizontal_wrapped(|ui| {
        for option in &field.options {
            ui.radio_value(&mut choice, option.value.clone(), &option.label);
        }
    });
    (choice != current).then(|| FieldValue::Text(choice))
}

fn file_input(
    ui: &mut Ui,
    field: &SearchField,
    value: &FieldValue,
    picker: &dyn FilePicker,
) -> Option<FieldValue> {
    let files: &[String] = match value {
        FieldValue::Files(files) => files,
        _ => &[],
    };
    let mut edited = None;

    ui.horizontal_wrapped(|ui| {
        let button = Button::new(if field.multiple { "选择文件（可多选）" } else { "选择文件" });
        if ui.add_enabled(!field.read_only, button).clicked() {
            let picked = picker.pick(field.accept.as_deref(), field.multiple);
            if !picked.is_empty() {
                edited = Some(FieldValue::Files(picked));
            }
        }
        if files.is_empty() {
            ui.weak("未选择文件");
        } else {
            ui.label(files.join(", "));
            if ui.small_button("✕").on_hover_text("清除").clicked() {
                edited = Some(FieldValue::Files(Vec::new()));
            }
        }
    });
    edited
}

fn range_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let min = field.min.unwrap_or(DEFAULT_RANGE.0);
    let max = field.max.unwrap_or(DEFAULT_RANGE.1).max(min);
    let mut number = value
        .as_text()
        .and_then(|text| text.parse::<f64>().ok())
        .unwrap_or(min)
        .clamp(min, max);

    ui.horizontal(|ui| {
        ui.weak(format_number(min));
        let mut slider = Slider::new(&mut number, min..=max).show_value(false);
        if let Some(step) = field.step.filter(|step| *step > 0.0) {
            slider = slider.step_by(step);
        }
        let changed = ui.add_enabled(!field.read_only, slider).changed();
        ui.weak(format_number(max));
        ui.label(format!("当前：{}", format_number(number)));
        changed.then(|| FieldValue::Text(format_number(number)))
    })
    .inner
}

fn color_input(ui: &mut Ui, field: &SearchField, value: &FieldValue) -> Option<FieldValue> {
    let text = value.as_text().unwrap_or_default();
    let mut rgb = parse_hex_color(text).unwrap_or_default();
    let mut hex = text.to_owned();

    ui.horizontal(|ui| {
        let mut edited = None;
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            edited = Some(FieldValue::Text(to_hex_color(rgb)));
        }
        let edit = TextEdit::singleline(&mut hex)
            .hint_text("#000000")
            .interactive(!field.read_only)
            .desired_width(HEX_INPUT_WIDTH);
        if ui.add(edit).changed() {
            edited = Some(FieldValue::Text(hex.clone()));
        }
        edited
    })
    .inner
}

fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(hex.get(at..at + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn to_hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Whole numbers without a trailing `.0`.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_fields_share_a_row_with_the_actions() {
        let rows = plan_rows(&[6, 6, 6], 6);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last(), Some(&Slot::Actions { span: 6 }));
    }

    #[test]
    fn full_row_pushes_actions_down() {
        let rows = plan_rows(&[6, 6, 6, 6], 24);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], [Slot::Actions { span: 24 }]);
    }

    #[test]
    fn wide_fields_wrap() {
        let rows = plan_rows(&[8, 16, 8], 16);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            [Slot::Field { index: 2, span: 8 }, Slot::Actions { span: 16 }]
        );
    }

    #[test]
    fn vertical_fields_stack() {
        let rows = plan_rows(&[24, 24], 24);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(to_hex_color([255, 128, 0]), "#ff8000");
    }

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
    }
}
