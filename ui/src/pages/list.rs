//! Shared scaffold of the list pages: stat cards, search form, data table and
//! pager driven by one column set.
//!
//! Search form callbacks and row action handlers only forward a
//! [`PageEvent`] into a flume channel. The channel is drained after the frame
//! is drawn, so nothing mutates the records while the table borrows them.
//!
//! Pages over an [`EditableRecord`] also get the 新增/编辑/查看 dialog: at
//! most one [`RecordForm`] is open at a time, and a successful save writes
//! straight into the page's records.

use egui::{Frame, Margin, RichText, Stroke, Ui};
use flume::{Receiver, Sender};
use yishan_business::search::{
    FormMode, FormValues, RecordForm, SearchField, SearchForm, SearchFormHandlers,
};
use yishan_business::table::{ActionHandlers, RowAction, TableState, TableView};
use yishan_business::{
    AdminConfig, ColumnDescriptor, FieldValue, FilterCriteria, FormError, Record,
};

use crate::utils::colors::{BORDER_COLOR, COLOR_GREEN, COLOR_RED};
use crate::widgets::{
    column_settings, data_table, pagination, record_form_dialog, search_form, table_toolbar,
};

const SECTION_SPACING: f32 = 12.0;

/// A record listed by a page, addressed by a stable id.
pub trait ListRecord: Record {
    fn id(&self) -> u32;
}

/// A record the page can create and edit through a [`RecordForm`].
pub trait EditableRecord: ListRecord + Sized {
    /// What the record is called in dialog titles and notices, e.g. `用户`.
    const NOUN: &'static str;

    /// Name shown in notices.
    fn display_name(&self) -> &str;

    fn form_fields() -> Vec<SearchField>;

    /// Current values, used to prefill the edit and detail forms.
    fn form_values(&self) -> Vec<(&'static str, FieldValue)>;

    /// Values a blank create form starts from.
    fn form_defaults() -> Vec<(&'static str, FieldValue)> {
        Vec::new()
    }

    /// Builds the saved record. `previous` is the edited record, `None` when
    /// creating. Fields missing from `values` keep their previous value.
    fn from_form(id: u32, values: &FormValues, previous: Option<&Self>) -> Self;
}

/// Creation time stamped on new records.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Something a form callback or row action asked the page to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Search(FilterCriteria),
    Reset,
    Action(RowAction, u32),
}

/// One-line feedback shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

fn forward(sender: &Sender<PageEvent>, event: PageEvent) {
    if sender.send(event).is_err() {
        log::warn!("list page event dropped: page receiver is gone");
    }
}

pub struct ListPage<R> {
    id: &'static str,
    columns: Vec<ColumnDescriptor<R>>,
    records: Vec<R>,
    form: SearchForm,
    table: TableState,
    handlers: ActionHandlers<R>,
    sender: Sender<PageEvent>,
    events: Receiver<PageEvent>,
    selectable: bool,
    notice: Option<Notice>,
    creatable: bool,
    create_requested: bool,
    editor: Option<RecordForm>,
}

impl<R: ListRecord> ListPage<R> {
    pub fn new(
        id: &'static str,
        columns: Vec<ColumnDescriptor<R>>,
        records: Vec<R>,
        config: &AdminConfig,
    ) -> Self {
        let (sender, events) = flume::unbounded();
        let handlers = SearchFormHandlers::new()
            .on_search({
                let sender = sender.clone();
                move |criteria| forward(&sender, PageEvent::Search(criteria.clone()))
            })
            .on_reset({
                let sender = sender.clone();
                move || forward(&sender, PageEvent::Reset)
            });
        let form = SearchForm::from_columns(&columns, config.search_form_config())
            .with_handlers(handlers);

        Self {
            id,
            columns,
            records,
            form,
            table: config.table_state(),
            handlers: ActionHandlers::new(),
            sender,
            events,
            selectable: false,
            notice: None,
            creatable: false,
            create_requested: false,
            editor: None,
        }
    }

    /// Routes clicks on `action` buttons back to the page.
    #[must_use]
    pub fn handle(mut self, action: RowAction) -> Self {
        let sender = self.sender.clone();
        self.handlers.insert(action, move |record: &R| {
            forward(&sender, PageEvent::Action(action, record.id()));
        });
        self
    }

    /// Shows a checkbox column for row selection.
    #[must_use]
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<R> {
        &mut self.records
    }

    pub fn record_mut(&mut self, id: u32) -> Option<&mut R> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Removes the record with `id`, returning it.
    pub fn remove(&mut self, id: u32) -> Option<R> {
        let position = self.records.iter().position(|record| record.id() == id)?;
        self.table.clear_selection();
        Some(self.records.remove(position))
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        if notice.is_error {
            log::warn!("{}", notice.text);
        } else {
            log::info!("{}", notice.text);
        }
        self.notice = Some(notice);
    }

    /// The table as it would be drawn now.
    pub fn view(&self) -> TableView {
        TableView::build(&self.columns, &self.records, &self.table, &self.handlers)
    }

    /// Records matching the current search and column filters.
    pub fn filtered<'a>(&'a self, view: &TableView) -> Vec<&'a R> {
        view.filtered_rows
            .iter()
            .filter_map(|index| self.records.get(*index))
            .collect()
    }

    /// Draws the page body. `stats` draws the cards above the search form
    /// from the filtered records.
    ///
    /// Returns the row actions clicked this frame, for the page to apply.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        stats: impl FnOnce(&mut Ui, &[&R]),
    ) -> Vec<(RowAction, u32)> {
        self.form.sync_columns(&self.columns);
        let view = self.view();

        stats(ui, &self.filtered(&view));
        ui.add_space(SECTION_SPACING);

        let form_response = Frame::NONE
            .stroke(Stroke::new(1.0, BORDER_COLOR))
            .corner_radius(6)
            .inner_margin(Margin::same(12))
            .show(ui, |ui| search_form(ui, &mut self.form))
            .inner;
        if let Some(Err(FormError::Validation(errors))) = &form_response.submitted {
            log::debug!("search blocked on page {}: {errors}", self.id);
        }
        ui.add_space(SECTION_SPACING);

        self.notice_bar(ui);

        let selected = self.table.selected_count();
        let creatable = self.creatable;
        let columns = &self.columns;
        let table = &mut self.table;
        let create_clicked = table_toolbar(ui, |ui| {
            column_settings(ui, columns, table);
            let clicked = creatable && ui.button("新增").clicked();
            if selected > 0 {
                ui.label(format!("已选择 {selected} 项"));
            }
            clicked
        });
        self.create_requested |= create_clicked;

        let table_response = data_table(ui, self.id, &view, &self.table, self.selectable);
        ui.add_space(SECTION_SPACING / 2.0);
        let pager = pagination(ui, (self.id, "pager"), &view);

        let handled = table_response.apply(&mut self.table, &view, &self.records, &self.handlers);
        if handled > 0 {
            log::debug!("{handled} row action(s) dispatched on page {}", self.id);
        }
        if let Some(pager) = pager {
            pager.apply(&mut self.table);
        }
        self.table.clamp_page(view.page_count);

        self.drain_events()
    }

    /// Applies queued form events and returns the queued row actions.
    pub fn drain_events(&mut self) -> Vec<(RowAction, u32)> {
        let mut actions = Vec::new();
        for event in self.events.try_iter() {
            match event {
                PageEvent::Search(criteria) => self.table.set_filter(criteria),
                PageEvent::Reset => self.table.set_filter(FilterCriteria::new()),
                PageEvent::Action(action, id) => actions.push((action, id)),
            }
        }
        actions
    }

    fn notice_bar(&mut self, ui: &mut Ui) {
        let Some(notice) = &self.notice else {
            return;
        };
        let color = if notice.is_error { COLOR_RED } else { COLOR_GREEN };
        let mut dismissed = false;
        Frame::NONE
            .stroke(Stroke::new(1.0, color.gamma_multiply(0.5)))
            .fill(color.gamma_multiply(0.08))
            .corner_radius(4)
            .inner_margin(Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&notice.text).color(color));
                    dismissed = ui.small_button("✕").on_hover_text("关闭").clicked();
                });
            });
        if dismissed {
            self.notice = None;
        }
        ui.add_space(SECTION_SPACING / 2.0);
    }
}

impl<R: EditableRecord> ListPage<R> {
    /// Offers a 新增 button in the table toolbar.
    #[must_use]
    pub fn creatable(mut self) -> Self {
        self.creatable = true;
        self
    }

    pub fn editor(&self) -> Option<&RecordForm> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut RecordForm> {
        self.editor.as_mut()
    }

    /// Opens `form`, replacing any open one.
    pub fn open_form(&mut self, form: RecordForm) {
        log::debug!("{:?} form opened on page {}", form.mode(), self.id);
        self.editor = Some(form);
    }

    pub fn open_create(&mut self) {
        self.open_form(RecordForm::create(R::form_fields()).with_values(R::form_defaults()));
    }

    /// Opens the edit form of record `id`. Returns `false` when it is gone.
    pub fn open_edit(&mut self, id: u32) -> bool {
        let Some(record) = self.records.iter().find(|record| record.id() == id) else {
            return false;
        };
        let form = RecordForm::edit(id, R::form_fields()).with_values(record.form_values());
        self.open_form(form);
        true
    }

    /// Opens the read-only details of record `id`.
    pub fn open_view(&mut self, id: u32) -> bool {
        let Some(record) = self.records.iter().find(|record| record.id() == id) else {
            return false;
        };
        let form = RecordForm::view(id, R::form_fields()).with_values(record.form_values());
        self.open_form(form);
        true
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Submits the open form. On success the record is written, the form is
    /// closed and a notice is set; on failure the form stays open with its
    /// errors.
    pub fn save_editor(&mut self) -> bool {
        let Some(form) = self.editor.as_mut() else {
            return false;
        };
        let mode = form.mode();
        match form.submit() {
            Ok(values) => {
                self.editor = None;
                self.apply_form(mode, &values);
                true
            }
            Err(err) => {
                log::debug!("save blocked on page {}: {err}", self.id);
                false
            }
        }
    }

    /// Writes submitted values back into the records.
    pub fn apply_form(&mut self, mode: FormMode, values: &FormValues) {
        let notice = match mode {
            FormMode::Create => {
                let id = self
                    .records
                    .iter()
                    .map(ListRecord::id)
                    .max()
                    .unwrap_or(0)
                    .saturating_add(1);
                let record = R::from_form(id, values, None);
                let notice =
                    Notice::success(format!("{}\"{}\"已创建", R::NOUN, record.display_name()));
                self.records.push(record);
                notice
            }
            FormMode::Edit(id) => match self.record_mut(id) {
                Some(record) => {
                    *record = R::from_form(id, values, Some(&*record));
                    Notice::success(format!("{}\"{}\"已更新", R::NOUN, record.display_name()))
                }
                None => Notice::error(format!("{}已不存在", R::NOUN)),
            },
            FormMode::View(_) => return,
        };
        self.set_notice(notice);
    }

    /// Draws the open form, if any, and applies its buttons. A pending 新增
    /// click opens a blank form first.
    pub fn editor_ui(&mut self, ui: &mut Ui) {
        if std::mem::take(&mut self.create_requested) {
            self.open_create();
        }
        let Some(form) = self.editor.as_mut() else {
            return;
        };
        let title = match (form.title(), form.mode()) {
            (Some(title), _) => title.to_owned(),
            (None, FormMode::Create) => format!("新增{}", R::NOUN),
            (None, FormMode::Edit(_)) => format!("编辑{}", R::NOUN),
            (None, FormMode::View(_)) => format!("{}详情", R::NOUN),
        };
        let mode = form.mode();
        let response = record_form_dialog(ui, self.id, &title, form);
        if let Some(values) = response.saved {
            self.editor = None;
            self.apply_form(mode, &values);
        } else if response.closed {
            self.editor = None;
        }
    }
}
