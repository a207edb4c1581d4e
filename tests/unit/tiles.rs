use std::sync::{Arc, Mutex};

use super::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Inval(&'static str, IntRect, u64),
    Discard(&'static str),
    Retile(&'static str),
    Swapped,
}

type Log = Arc<Mutex<Vec<Call>>>;

struct LogPage {
    name: &'static str,
    log: Log,
}

impl TilePage for LogPage {
    fn invalidate_rect(&self, rect: IntRect, generation: u64) {
        self.log
            .lock()
            .unwrap()
            .push(Call::Inval(self.name, rect, generation));
    }

    fn discard_textures(&self) {
        self.log.lock().unwrap().push(Call::Discard(self.name));
    }

    fn update_base_tile_size(&self) {
        self.log.lock().unwrap().push(Call::Retile(self.name));
    }
}

struct LogZoom {
    log: Log,
}

impl ZoomManager for LogZoom {
    fn current_scale(&self) -> f32 {
        1.0
    }

    fn future_scale(&self) -> f32 {
        1.0
    }

    fn notify_pages_swapped(&self) {
        self.log.lock().unwrap().push(Call::Swapped);
    }

    fn process_new_scale(&self, _time: f64, _scale: f32) {}
}

fn pages() -> (TilePages, Log) {
    let log: Log = Arc::default();
    let pages = TilePages::new(
        Box::new(LogPage {
            name: "a",
            log: log.clone(),
        }),
        Box::new(LogPage {
            name: "b",
            log: log.clone(),
        }),
    );
    (pages, log)
}

#[test]
fn page_a_starts_in_front() {
    let (pages, _) = pages();
    assert_eq!(pages.front_slot(), PageSlot::A);
    assert_eq!(pages.back_slot(), PageSlot::B);
}

#[test]
fn swap_notifies_then_evicts_only_the_vacated_page() {
    let (pages, log) = pages();
    let zoom = LogZoom { log: log.clone() };

    pages.swap_pages(&zoom);
    assert_eq!(pages.front_slot(), PageSlot::B);
    assert_eq!(
        *log.lock().unwrap(),
        vec![Call::Swapped, Call::Discard("a")]
    );

    log.lock().unwrap().clear();
    pages.swap_pages(&zoom);
    assert_eq!(pages.front_slot(), PageSlot::A);
    assert_eq!(
        *log.lock().unwrap(),
        vec![Call::Swapped, Call::Discard("b")]
    );
}

#[test]
fn front_page_follows_swaps() {
    let (pages, log) = pages();
    let zoom = LogZoom { log: log.clone() };
    pages.swap_pages(&zoom);
    log.lock().unwrap().clear();

    pages.front_page().invalidate_rect(IntRect::new(0, 0, 1, 1), 7);
    pages.back_page().update_base_tile_size();
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            Call::Inval("b", IntRect::new(0, 0, 1, 1), 7),
            Call::Retile("a")
        ]
    );
}

#[test]
fn sibling_is_a_pure_lookup() {
    let (pages, log) = pages();
    assert_eq!(PageSlot::A.sibling(), PageSlot::B);
    assert_eq!(PageSlot::B.sibling().sibling(), PageSlot::B);

    pages.sibling(PageSlot::A).discard_textures();
    assert_eq!(*log.lock().unwrap(), vec![Call::Discard("b")]);
}
