//! Modal dialog over a [`RecordForm`]: one labelled row per field, inline
//! errors, and 取消/确定 (or 关闭 for detail views) at the bottom.

use std::hash::Hash;

use egui::{Align, Grid, Id, Layout, Modal, RichText, Ui};
use ustr::Ustr;
use yishan_business::FieldValue;
use yishan_business::search::{FormValues, RecordForm};

use super::search_form::{field_label, input};
use crate::utils::colors::COLOR_RED;
use crate::utils::file_picker::SystemFilePicker;

const DIALOG_WIDTH: f32 = 520.0;
const INPUT_WIDTH: f32 = 360.0;

#[derive(Debug, Default)]
pub struct RecordFormResponse {
    /// Values of a 确定 click that passed validation.
    pub saved: Option<FormValues>,
    /// 取消, 关闭, Escape or a click outside the dialog.
    pub closed: bool,
}

/// Draws `form` in a modal titled `title` and applies this frame's edits.
pub fn record_form_dialog(
    ui: &mut Ui,
    id_salt: impl Hash,
    title: &str,
    form: &mut RecordForm,
) -> RecordFormResponse {
    let read_only = form.is_read_only();
    let mut edits: Vec<(Ustr, FieldValue)> = Vec::new();
    let mut save = false;
    let mut close = false;

    let modal = Modal::new(Id::new(("record_form", id_salt))).show(ui.ctx(), |ui| {
        ui.set_width(DIALOG_WIDTH);
        ui.heading(title);
        ui.add_space(8.0);

        let empty = FieldValue::default();
        Grid::new("record_form_fields")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                for field in form.fields() {
                    ui.label(field_label(ui, field, field.required && !read_only));
                    ui.vertical(|ui| {
                        ui.set_width(INPUT_WIDTH);
                        let value = form.value(&field.key).unwrap_or(&empty);
                        let edited = ui
                            .add_enabled_ui(!read_only, |ui| {
                                input(ui, field, value, &SystemFilePicker)
                            })
                            .inner;
                        if let Some(value) = edited {
                            edits.push((field.key, value));
                        }
                        if let Some(error) = form.error(&field.key) {
                            ui.label(RichText::new(error).color(COLOR_RED).small());
                        }
                    });
                    ui.end_row();
                }
            });

        ui.separator();
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if read_only {
                close = ui.button("关闭").clicked();
            } else {
                save = ui.button("确定").clicked();
                close = ui.button("取消").clicked();
            }
        });
    });

    for (key, value) in edits {
        form.set_value(&key, value);
    }

    let mut response = RecordFormResponse {
        closed: close || modal.should_close(),
        ..RecordFormResponse::default()
    };
    if save {
        match form.submit() {
            Ok(values) => response.saved = Some(values),
            Err(err) => log::debug!("{title}: {err}"),
        }
    }
    response
}
