use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::catalog::{Entity, PageRequest};
use crate::config::Config;
use crate::translate::{CATEGORY_CODES, Locale};

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which narrowing action produced the current filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    None,
    Search(String),
    Category(String),
}

/// Result of one page load, delivered back to the UI loop.
#[derive(Debug)]
pub enum BatchOutcome {
    Loaded {
        request: PageRequest,
        entities: Vec<Entity>,
    },
    Failed {
        request: PageRequest,
        message: String,
    },
}

/// Transient on-screen message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

pub const LIST_OVERHEAD: u16 = 9;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub locale: Locale,
    page_size: u32,
    catalog_max: u32,
    notice_duration: Duration,

    // Loaded catalog. Append-only.
    pub all_entities: Vec<Entity>,
    /// Indices into `all_entities`, in catalog order.
    pub filtered: Vec<usize>,
    pub active_filter: ActiveFilter,
    pub current_page: u32,
    pub loading: bool,

    // List view state
    pub list_selected: usize, // Index within visible page
    pub list_offset: usize,   // Offset into filtered
    pub rows: usize,

    pub search_input: String,
    pub input_mode: InputMode,

    /// Cursor in the category picker while it is open. 0 is "all".
    pub category_picker: Option<usize>,

    // Detail modal: index into all_entities
    pub detail: Option<usize>,
    pub detail_scroll: u16,

    pub notice: Option<Notice>,
    pub status_msg: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            locale: config.language,
            page_size: config.page_size,
            catalog_max: config.catalog_max,
            notice_duration: config.notice_duration(),

            all_entities: Vec::new(),
            filtered: Vec::new(),
            active_filter: ActiveFilter::None,
            current_page: 1,
            loading: false,

            list_selected: 0,
            list_offset: 0,
            rows: 20, // Updated on first resize

            search_input: String::new(),
            input_mode: InputMode::Normal,

            category_picker: None,

            detail: None,
            detail_scroll: 0,

            notice: None,
            status_msg: String::new(),
        }
    }

    // ── Loading ──

    /// Claim the loading flag for the current page. `None` when a batch is
    /// already in flight or the page lies past the catalog.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.loading {
            debug!(page = self.current_page, "load already in flight, ignoring");
            return None;
        }
        let request = PageRequest::for_page(self.current_page, self.page_size, self.catalog_max)?;
        self.loading = true;
        self.status_msg = format!("Loading #{}–#{}...", request.start, request.end);
        Some(request)
    }

    /// Advance to the next page and claim the loading flag for it.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.loading || !self.pagination_visible() {
            return None;
        }
        self.current_page += 1;
        self.begin_load()
    }

    /// Apply a finished batch. Always releases the loading flag.
    pub fn finish_load(&mut self, outcome: BatchOutcome, now: Instant) {
        self.loading = false;
        match outcome {
            BatchOutcome::Loaded { request, entities } => {
                let known: HashSet<u32> = self.all_entities.iter().map(|e| e.id).collect();
                let before = self.all_entities.len();
                self.all_entities
                    .extend(entities.into_iter().filter(|e| !known.contains(&e.id)));
                let added = self.all_entities.len() - before;
                info!(page = request.page, added, total = self.all_entities.len(), "batch applied");

                // A fresh page shows the whole catalog again. The search bar
                // text is left as typed.
                self.reset_filter();
                self.status_msg = format!(
                    "{} of {} requested loaded ({} total)",
                    added,
                    request.len(),
                    self.all_entities.len()
                );
            }
            BatchOutcome::Failed { request, message } => {
                error!(page = request.page, %message, "page load failed");
                self.show_notice(
                    match self.locale {
                        Locale::Pt => "Erro ao carregar Pokémon. Tente novamente.",
                        Locale::En => "Failed to load entries. Please try again.",
                    },
                    now,
                );
                self.status_msg.clear();
            }
        }
    }

    /// Whether the whole catalog range has been requested.
    pub fn catalog_exhausted(&self) -> bool {
        PageRequest::for_page(self.current_page, self.page_size, self.catalog_max)
            .is_none_or(|r| r.reaches(self.catalog_max))
    }

    /// "Load more" is offered only while pages remain and nothing narrows
    /// the view.
    pub fn pagination_visible(&self) -> bool {
        !self.catalog_exhausted() && self.filtered.len() >= self.all_entities.len()
    }

    // ── Notices ──

    pub fn show_notice(&mut self, message: &str, now: Instant) {
        self.notice = Some(Notice {
            message: message.to_string(),
            expires_at: now + self.notice_duration,
        });
    }

    /// Drop the notice once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }

    // ── Search and filter ──

    fn reset_filter(&mut self) {
        self.filtered = (0..self.all_entities.len()).collect();
        self.active_filter = ActiveFilter::None;
        self.reset_list();
    }

    /// Filter by the search bar: substring of the name, or of the id as text.
    pub fn search(&mut self) {
        let term = self.search_input.trim().to_lowercase();
        if term.is_empty() {
            self.reset_filter();
        } else {
            self.filtered = self
                .all_entities
                .iter()
                .enumerate()
                .filter(|(_, e)| e.name.to_lowercase().contains(&term) || e.id.to_string().contains(&term))
                .map(|(i, _)| i)
                .collect();
            self.active_filter = ActiveFilter::Search(term);
            self.reset_list();
        }
        self.update_filter_status();
    }

    /// Filter by one category code; `None` shows everything.
    pub fn filter_category(&mut self, category: Option<&str>) {
        self.search_input.clear();
        match category {
            None | Some("") => self.reset_filter(),
            Some(code) => {
                self.filtered = self
                    .all_entities
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.has_category(code))
                    .map(|(i, _)| i)
                    .collect();
                self.active_filter = ActiveFilter::Category(code.to_string());
                self.reset_list();
            }
        }
        self.update_filter_status();
    }

    fn update_filter_status(&mut self) {
        self.status_msg = match &self.active_filter {
            ActiveFilter::None => format!("{} entries", self.all_entities.len()),
            ActiveFilter::Search(term) => format!(
                "{} of {} match \"{}\"",
                self.filtered.len(),
                self.all_entities.len(),
                term
            ),
            ActiveFilter::Category(code) => format!(
                "{} of {} are {}",
                self.filtered.len(),
                self.all_entities.len(),
                code
            ),
        };
    }

    pub fn filtered_entities(&self) -> impl Iterator<Item = &Entity> {
        self.filtered.iter().map(|&i| &self.all_entities[i])
    }

    /// The category currently applied, if any.
    pub fn selected_category(&self) -> Option<&str> {
        match &self.active_filter {
            ActiveFilter::Category(code) => Some(code.as_str()),
            _ => None,
        }
    }

    // ── Category picker ──

    pub fn open_category_picker(&mut self) {
        let cursor = self
            .selected_category()
            .and_then(|c| CATEGORY_CODES.iter().position(|code| *code == c))
            .map(|p| p + 1)
            .unwrap_or(0);
        self.category_picker = Some(cursor);
    }

    pub fn picker_next(&mut self) {
        if let Some(cursor) = self.category_picker.as_mut() {
            *cursor = (*cursor + 1).min(CATEGORY_CODES.len());
        }
    }

    pub fn picker_prev(&mut self) {
        if let Some(cursor) = self.category_picker.as_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn picker_confirm(&mut self) {
        if let Some(cursor) = self.category_picker.take() {
            let code = cursor.checked_sub(1).and_then(|i| CATEGORY_CODES.get(i)).copied();
            self.filter_category(code);
        }
    }

    pub fn picker_cancel(&mut self) {
        self.category_picker = None;
    }

    // ── Random pick and modal ──

    /// Open a uniformly chosen loaded entity. No-op on an empty catalog.
    pub fn random_pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.all_entities.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.all_entities.len());
        self.open_detail_at(index);
        Some(index)
    }

    pub fn open_detail_at(&mut self, index: usize) {
        if index < self.all_entities.len() {
            self.detail = Some(index);
            self.detail_scroll = 0;
        }
    }

    /// Open the modal for the highlighted card.
    pub fn open_selected(&mut self) {
        if let Some(&index) = self.filtered.get(self.list_offset + self.list_selected) {
            self.open_detail_at(index);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
    }

    pub fn detail_entity(&self) -> Option<&Entity> {
        self.detail.and_then(|i| self.all_entities.get(i))
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // ── List navigation ──

    fn reset_list(&mut self) {
        self.list_offset = 0;
        self.list_selected = 0;
    }

    /// Visible slice of the filtered view.
    pub fn visible_indices(&self) -> &[usize] {
        let start = self.list_offset.min(self.filtered.len());
        let end = (start + self.rows).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// Update visible rows based on terminal height.
    pub fn update_rows(&mut self, terminal_height: u16) {
        self.rows = (terminal_height.saturating_sub(LIST_OVERHEAD) as usize).max(1);
        if self.list_selected >= self.rows {
            self.list_offset += self.list_selected - self.rows + 1;
            self.list_selected = self.rows - 1;
        }
    }

    /// Select a row of the visible page, e.g. from a mouse click.
    pub fn select_row(&mut self, row: usize) -> bool {
        if row < self.visible_indices().len() {
            self.list_selected = row;
            true
        } else {
            false
        }
    }

    pub fn list_next(&mut self) {
        let visible = self.visible_indices().len();
        if visible == 0 {
            return;
        }
        if self.list_selected + 1 < visible {
            self.list_selected += 1;
        } else if self.list_offset + self.rows < self.filtered.len() {
            self.list_offset += self.rows;
            self.list_selected = 0;
        }
    }

    pub fn list_prev(&mut self) {
        if self.list_selected > 0 {
            self.list_selected -= 1;
        } else if self.list_offset > 0 {
            self.list_offset = self.list_offset.saturating_sub(self.rows);
            self.list_selected = self.visible_indices().len().saturating_sub(1);
        }
    }

    pub fn list_page_down(&mut self) {
        if self.list_offset + self.rows < self.filtered.len() {
            self.list_offset += self.rows;
            self.list_selected = 0;
        } else {
            self.list_selected = self.visible_indices().len().saturating_sub(1);
        }
    }

    pub fn list_page_up(&mut self) {
        self.list_offset = self.list_offset.saturating_sub(self.rows);
        self.list_selected = 0;
    }

    pub fn list_first(&mut self) {
        self.reset_list();
    }

    pub fn list_last(&mut self) {
        if !self.filtered.is_empty() {
            self.list_offset = ((self.filtered.len() - 1) / self.rows) * self.rows;
            self.list_selected = self.visible_indices().len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::entity;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> App {
        App::new(&Config::default())
    }

    fn page_of(request: PageRequest) -> Vec<Entity> {
        request
            .ids()
            .map(|id| entity(id, &format!("creature-{id}"), &["normal"]))
            .collect()
    }

    /// App with the first page loaded.
    fn loaded_app() -> App {
        let mut app = app();
        let request = app.begin_load().unwrap();
        let entities = page_of(request);
        app.finish_load(BatchOutcome::Loaded { request, entities }, Instant::now());
        app
    }

    #[test]
    fn test_loading_flag_starts_false() {
        assert!(!app().loading);
    }

    #[test]
    fn test_begin_load_guards_reentry() {
        let mut app = app();
        let first = app.begin_load();
        assert_eq!(first.map(|r| (r.start, r.end)), Some((1, 20)));
        assert!(app.loading);
        assert!(app.begin_load().is_none());
        assert!(app.request_next_page().is_none());
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_first_page_scenario() {
        let app = loaded_app();
        assert!(!app.loading);
        assert_eq!(app.all_entities.len(), 20);
        assert_eq!(app.filtered.len(), 20);
        assert!(app.pagination_visible());
    }

    #[test]
    fn test_one_failed_fetch_scenario() {
        let mut app = app();
        let request = app.begin_load().unwrap();
        let entities: Vec<Entity> = page_of(request).into_iter().filter(|e| e.id != 13).collect();
        app.finish_load(BatchOutcome::Loaded { request, entities }, Instant::now());
        assert_eq!(app.all_entities.len(), 19);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_failed_batch_raises_notice_and_clears_flag() {
        let mut app = app();
        let request = app.begin_load().unwrap();
        let now = Instant::now();
        app.finish_load(
            BatchOutcome::Failed { request, message: "task panicked".into() },
            now,
        );
        assert!(!app.loading);
        assert!(app.all_entities.is_empty());
        let notice = app.notice.as_ref().unwrap();
        assert!(notice.message.starts_with("Erro ao carregar"));

        app.tick(now + Duration::from_secs(4));
        assert!(app.notice.is_some());
        app.tick(now + Duration::from_secs(5));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_next_page_appends() {
        let mut app = loaded_app();
        let request = app.request_next_page().unwrap();
        assert_eq!(app.current_page, 2);
        assert_eq!((request.start, request.end), (21, 40));
        let entities = page_of(request);
        app.finish_load(BatchOutcome::Loaded { request, entities }, Instant::now());
        assert_eq!(app.all_entities.len(), 40);
        let ids: Vec<u32> = app.all_entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_ids_are_not_appended() {
        let mut app = loaded_app();
        let request = PageRequest::for_page(1, 20, 1010).unwrap();
        app.loading = true;
        app.finish_load(
            BatchOutcome::Loaded { request, entities: page_of(request) },
            Instant::now(),
        );
        assert_eq!(app.all_entities.len(), 20);
    }

    #[test]
    fn test_last_page_hides_pagination() {
        let config = Config {
            page_size: 20,
            catalog_max: 30,
            ..Config::default()
        };
        let mut app = App::new(&config);
        let request = app.begin_load().unwrap();
        app.finish_load(
            BatchOutcome::Loaded { request, entities: page_of(request) },
            Instant::now(),
        );
        let request = app.request_next_page().unwrap();
        assert_eq!((request.start, request.end), (21, 30));
        app.finish_load(
            BatchOutcome::Loaded { request, entities: page_of(request) },
            Instant::now(),
        );
        assert!(app.catalog_exhausted());
        assert!(!app.pagination_visible());
        assert!(app.request_next_page().is_none());
    }

    #[test]
    fn test_search_by_name() {
        let mut app = loaded_app();
        app.search_input = "  CREATURE-1".to_string();
        app.search();
        let ids: Vec<u32> = app.filtered_entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
        assert!(!app.pagination_visible());
    }

    #[test]
    fn test_search_by_id_text() {
        let mut app = app();
        let request = app.begin_load().unwrap();
        let entities = vec![entity(7, "squirtle", &["water"]), entity(17, "pidgeotto", &["normal"])];
        app.finish_load(BatchOutcome::Loaded { request, entities }, Instant::now());

        app.search_input = "7".to_string();
        app.search();
        assert_eq!(app.filtered.len(), 2);

        app.search_input = "17".to_string();
        app.search();
        let names: Vec<&str> = app.filtered_entities().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pidgeotto"]);
    }

    #[test]
    fn test_category_scenario() {
        let mut app = app();
        let request = app.begin_load().unwrap();
        let entities = vec![
            entity(1, "bulbasaur", &["grass", "poison"]),
            entity(4, "charmander", &["fire"]),
            entity(6, "charizard", &["fire", "flying"]),
            entity(7, "squirtle", &["water"]),
        ];
        app.finish_load(BatchOutcome::Loaded { request, entities }, Instant::now());

        app.filter_category(Some("fire"));
        let ids: Vec<u32> = app.filtered_entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 6]);
        assert_eq!(app.selected_category(), Some("fire"));
        assert!(!app.pagination_visible());

        app.filter_category(Some("dragon"));
        assert!(app.filtered.is_empty());

        app.filter_category(None);
        assert_eq!(app.filtered.len(), 4);
        assert!(app.pagination_visible());
    }

    #[test]
    fn test_new_page_resets_filter() {
        let mut app = loaded_app();
        app.search_input = "creature-2".to_string();
        app.search();
        assert!(app.filtered.len() < app.all_entities.len());

        // Filter that happens to match everything keeps "load more" available.
        app.search_input = "creature".to_string();
        app.search();
        let request = app.request_next_page().unwrap();
        app.finish_load(
            BatchOutcome::Loaded { request, entities: page_of(request) },
            Instant::now(),
        );
        assert_eq!(app.active_filter, ActiveFilter::None);
        assert_eq!(app.search_input, "creature");
        assert_eq!(app.filtered.len(), 40);
    }

    #[test]
    fn test_batch_landing_keeps_text_being_typed() {
        let mut app = app();
        let request = app.begin_load().unwrap();
        app.input_mode = InputMode::Editing;
        app.search_input = "char".to_string();

        app.finish_load(
            BatchOutcome::Loaded { request, entities: page_of(request) },
            Instant::now(),
        );

        assert_eq!(app.search_input, "char");
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.filtered.len(), 20);
    }

    #[test]
    fn test_category_picker() {
        let mut app = loaded_app();
        app.open_category_picker();
        assert_eq!(app.category_picker, Some(0));
        app.picker_next();
        app.picker_next();
        app.picker_confirm();
        assert_eq!(app.selected_category(), Some("fire"));
        assert!(app.category_picker.is_none());

        app.open_category_picker();
        assert_eq!(app.category_picker, Some(2));
        app.picker_prev();
        app.picker_prev();
        app.picker_prev();
        app.picker_confirm();
        assert_eq!(app.active_filter, ActiveFilter::None);
        assert_eq!(app.filtered.len(), 20);
    }

    #[test]
    fn test_random_pick_empty_is_noop() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(app.random_pick(&mut rng), None);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_random_pick_opens_detail() {
        let mut app = loaded_app();
        let mut rng = StdRng::seed_from_u64(7);
        let index = app.random_pick(&mut rng).unwrap();
        assert!(index < 20);
        assert_eq!(app.detail, Some(index));
        app.close_detail();
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_open_selected_follows_filter() {
        let mut app = loaded_app();
        app.search_input = "creature-5".to_string();
        app.search();
        app.open_selected();
        assert_eq!(app.detail_entity().map(|e| e.id), Some(5));
    }

    #[test]
    fn test_list_navigation_pages() {
        let mut app = loaded_app();
        app.rows = 8;
        for _ in 0..8 {
            app.list_next();
        }
        assert_eq!((app.list_offset, app.list_selected), (8, 0));
        app.list_prev();
        assert_eq!((app.list_offset, app.list_selected), (0, 7));
        app.list_last();
        assert_eq!((app.list_offset, app.list_selected), (16, 3));
        app.list_next();
        assert_eq!((app.list_offset, app.list_selected), (16, 3));
        app.list_first();
        assert_eq!((app.list_offset, app.list_selected), (0, 0));
        assert!(app.select_row(5));
        assert!(!app.select_row(8));
    }

    proptest! {
        #[test]
        fn prop_clearing_search_restores_everything(term in "[a-z0-9 -]{0,8}") {
            let mut app = loaded_app();
            app.search_input = term;
            app.search();
            prop_assert!(app.filtered.iter().all(|&i| i < app.all_entities.len()));

            app.search_input = "   ".to_string();
            app.search();
            let all: Vec<u32> = app.all_entities.iter().map(|e| e.id).collect();
            let shown: Vec<u32> = app.filtered_entities().map(|e| e.id).collect();
            prop_assert_eq!(shown, all);
        }

        #[test]
        fn prop_id_substring_finds_entity(id in 1u32..=20) {
            let mut app = loaded_app();
            let text = id.to_string();
            let end = 1 + (id as usize % text.len());
            app.search_input = text[..end].to_string();
            app.search();
            prop_assert!(app.filtered_entities().any(|e| e.id == id));
        }

        #[test]
        fn prop_pages_grow_without_duplicates(pages in 1usize..6) {
            let mut app = app();
            let mut last_len = 0;
            for i in 0..pages {
                let request = if i == 0 { app.begin_load() } else { app.request_next_page() };
                let request = request.unwrap();
                app.finish_load(
                    BatchOutcome::Loaded { request, entities: page_of(request) },
                    Instant::now(),
                );
                prop_assert!(!app.loading);
                prop_assert!(app.all_entities.len() >= last_len);
                last_len = app.all_entities.len();
            }
            let ids: HashSet<u32> = app.all_entities.iter().map(|e| e.id).collect();
            prop_assert_eq!(ids.len(), app.all_entities.len());
        }
    }
}
