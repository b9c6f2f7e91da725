//! Fetch layer: catalog records and concurrent page loading.

mod client;
pub mod wire;

pub use client::PokeApiClient;

use futures_util::future::join_all;
use std::future::Future;
use std::ops::RangeInclusive;

/// One catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    /// Category (type) codes in slot order.
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    pub descriptor: Option<Descriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// Localized flavour text attached to an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    pub entries: Vec<DescriptorEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorEntry {
    pub language: String,
    pub text: String,
}

impl Descriptor {
    /// First entry in `language`, with form feeds and line breaks flattened.
    pub fn select(&self, language: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|e| e.language == language)
            .map(|e| e.text.replace(['\u{c}', '\n', '\r'], " "))
    }
}

impl Entity {
    pub fn has_category(&self, code: &str) -> bool {
        self.categories.iter().any(|c| c == code)
    }
}

/// The id range covered by one page of pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub start: u32,
    pub end: u32,
}

impl PageRequest {
    /// Ids `(page-1)*size+1 ..= min(start+size-1, catalog_max)`.
    /// `None` once the page starts past the end of the catalog.
    pub fn for_page(page: u32, page_size: u32, catalog_max: u32) -> Option<Self> {
        if page == 0 || page_size == 0 {
            return None;
        }
        let start = (page - 1).checked_mul(page_size)?.checked_add(1)?;
        if start > catalog_max {
            return None;
        }
        let end = start.saturating_add(page_size - 1).min(catalog_max);
        Some(Self { page, start, end })
    }

    pub fn ids(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Whether this page reaches the catalog bound.
    pub fn reaches(&self, catalog_max: u32) -> bool {
        self.end >= catalog_max
    }
}

/// Anything that can resolve an id into an entity. Failures are absorbed
/// and reported as `None`.
pub trait EntitySource: Send + Sync + 'static {
    fn fetch_entity(&self, id: u32) -> impl Future<Output = Option<Entity>> + Send;
}

/// Fetch every id of the page concurrently and keep the ones that resolved,
/// in id order. Nothing is returned until the whole batch has settled.
pub async fn load_page<S: EntitySource>(source: &S, request: PageRequest) -> Vec<Entity> {
    let fetches: Vec<_> = request.ids().map(|id| source.fetch_entity(id)).collect();
    let results = join_all(fetches).await;
    let total = results.len();
    let entities: Vec<Entity> = results.into_iter().flatten().collect();

    if entities.len() < total {
        tracing::info!(
            page = request.page,
            dropped = total - entities.len(),
            "page loaded with missing entities"
        );
    } else {
        tracing::debug!(page = request.page, count = total, "page loaded");
    }
    entities
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Builds a plain entity for tests.
    pub(crate) fn entity(id: u32, name: &str, categories: &[&str]) -> Entity {
        Entity {
            id,
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            image_url: Some(format!("https://img/{id}.png")),
            height: 7,
            weight: 69,
            base_experience: Some(64),
            abilities: vec!["overgrow".to_string()],
            stats: vec![
                Stat { name: "hp".to_string(), value: 45 },
                Stat { name: "attack".to_string(), value: 250 },
            ],
            descriptor: None,
        }
    }

    /// In-memory source; ids listed in `failing` resolve to `None`.
    pub(crate) struct FakeSource {
        pub failing: HashSet<u32>,
        pub requested: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        pub(crate) fn new() -> Self {
            Self {
                failing: HashSet::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(ids: &[u32]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl EntitySource for FakeSource {
        async fn fetch_entity(&self, id: u32) -> Option<Entity> {
            self.requested.lock().unwrap().push(id);
            tokio::task::yield_now().await;
            if self.failing.contains(&id) {
                None
            } else {
                Some(entity(id, &format!("creature-{id}"), &["normal"]))
            }
        }
    }

    #[test]
    fn test_page_request_first_page() {
        let req = PageRequest::for_page(1, 20, 1010).unwrap();
        assert_eq!((req.start, req.end), (1, 20));
        assert_eq!(req.len(), 20);
        assert!(!req.reaches(1010));
    }

    #[test]
    fn test_page_request_clamps_to_catalog_max() {
        let req = PageRequest::for_page(51, 20, 1010).unwrap();
        assert_eq!((req.start, req.end), (1001, 1010));
        assert_eq!(req.len(), 10);
        assert!(req.reaches(1010));
    }

    #[test]
    fn test_page_request_past_end() {
        assert_eq!(PageRequest::for_page(52, 20, 1010), None);
        assert_eq!(PageRequest::for_page(0, 20, 1010), None);
        assert_eq!(PageRequest::for_page(1, 0, 1010), None);
    }

    #[test]
    fn test_page_request_exact_boundary() {
        let req = PageRequest::for_page(2, 20, 40).unwrap();
        assert_eq!((req.start, req.end), (21, 40));
        assert!(req.reaches(40));
    }

    #[test]
    fn test_descriptor_select() {
        let descriptor = Descriptor {
            entries: vec![
                DescriptorEntry { language: "en".into(), text: "Seed\u{c}creature".into() },
                DescriptorEntry { language: "pt".into(), text: "Uma\u{c}semente".into() },
                DescriptorEntry { language: "pt".into(), text: "second".into() },
            ],
        };
        assert_eq!(descriptor.select("pt").as_deref(), Some("Uma semente"));
        assert_eq!(descriptor.select("en").as_deref(), Some("Seed creature"));
        assert_eq!(descriptor.select("ja"), None);
    }

    #[tokio::test]
    async fn test_load_page_all_succeed() {
        let source = FakeSource::new();
        let req = PageRequest::for_page(1, 20, 1010).unwrap();
        let entities = load_page(&source, req).await;
        assert_eq!(entities.len(), 20);
        let ids: Vec<u32> = entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_load_page_drops_failures() {
        let source = FakeSource::failing(&[7]);
        let req = PageRequest::for_page(1, 20, 1010).unwrap();
        let entities = load_page(&source, req).await;
        assert_eq!(entities.len(), 19);
        assert!(entities.iter().all(|e| e.id != 7));
    }

    /// Every fetch blocks until the whole page has been issued.
    struct GatedSource {
        gate: tokio::sync::Barrier,
    }

    impl EntitySource for GatedSource {
        async fn fetch_entity(&self, id: u32) -> Option<Entity> {
            self.gate.wait().await;
            Some(entity(id, "gated", &["normal"]))
        }
    }

    #[tokio::test]
    async fn test_load_page_runs_fetches_concurrently() {
        let req = PageRequest::for_page(1, 20, 1010).unwrap();
        let source = GatedSource {
            gate: tokio::sync::Barrier::new(req.len()),
        };
        let entities = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            load_page(&source, req),
        )
        .await
        .expect("fetches of one page must all be in flight together");
        assert_eq!(entities.len(), 20);
    }

    #[tokio::test]
    async fn test_load_page_issues_every_id() {
        let source = FakeSource::new();
        let req = PageRequest::for_page(3, 5, 1010).unwrap();
        load_page(&source, req).await;
        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, vec![11, 12, 13, 14, 15]);
    }
}
