//! Course-code and course-ID lookup cache.
//!
//! Populated as a side effect of every course record the tools see. Entries
//! are overwritten when a fresher record arrives; nothing expires.

use canvas_async::types::Course;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Maps {
    code_to_id: HashMap<String, String>,
    id_to_code: HashMap<String, String>,
}

/// Two-way map between course codes and numeric course IDs.
///
/// Both directions live behind one lock so they always mirror each other.
#[derive(Debug, Default)]
pub struct CourseCache {
    maps: Mutex<Maps>,
}

impl CourseCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that `code` names the course with ID `id`.
    ///
    /// Any older pairing of either side is dropped first, so a recoded course
    /// no longer answers to its previous code.
    pub fn put(&self, code: &str, id: &str) {
        let mut maps = self.lock();
        if let Some(old_id) = maps.code_to_id.remove(code) {
            maps.id_to_code.remove(&old_id);
        }
        if let Some(old_code) = maps.id_to_code.remove(id) {
            maps.code_to_id.remove(&old_code);
        }
        maps.code_to_id.insert(code.to_string(), id.to_string());
        maps.id_to_code.insert(id.to_string(), code.to_string());
    }

    pub fn id_for_code(&self, code: &str) -> Option<String> {
        self.lock().code_to_id.get(code).cloned()
    }

    pub fn code_for_id(&self, id: &str) -> Option<String> {
        self.lock().id_to_code.get(id).cloned()
    }

    /// Store every record that carries both an ID and a non-empty code.
    pub fn refresh_from(&self, courses: &[Course]) {
        for course in courses {
            self.refresh_one(course);
        }
    }

    pub(crate) fn refresh_one(&self, course: &Course) {
        if let (Some(id), Some(code)) = (course.id_string(), course.course_code.as_deref())
            && !code.is_empty()
        {
            self.put(code, &id);
        }
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.lock().code_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, code: &str) -> Course {
        Course {
            id: Some(id),
            course_code: Some(code.to_string()),
            ..Course::default()
        }
    }

    #[test]
    fn put_stores_both_directions() {
        let cache = CourseCache::new();
        cache.put("badm_554_120251_246794", "4242");

        assert_eq!(
            cache.id_for_code("badm_554_120251_246794").as_deref(),
            Some("4242")
        );
        assert_eq!(
            cache.code_for_id("4242").as_deref(),
            Some("badm_554_120251_246794")
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn recoded_course_drops_the_old_code() {
        let cache = CourseCache::new();
        cache.put("old_code", "1");
        cache.put("new_code", "1");

        assert!(cache.id_for_code("old_code").is_none());
        assert_eq!(cache.code_for_id("1").as_deref(), Some("new_code"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn code_moved_to_another_course_drops_the_old_id() {
        let cache = CourseCache::new();
        cache.put("shared", "1");
        cache.put("shared", "2");

        assert!(cache.code_for_id("1").is_none());
        assert_eq!(cache.id_for_code("shared").as_deref(), Some("2"));
    }

    #[test]
    fn refresh_skips_incomplete_records() {
        let cache = CourseCache::new();
        let nameless = Course {
            id: Some(3),
            ..Course::default()
        };
        let blank_code = course(4, "");
        cache.refresh_from(&[course(1, "a"), nameless, blank_code, course(2, "b")]);

        assert_eq!(cache.len(), 2);
        assert!(cache.code_for_id("3").is_none());
        assert!(cache.code_for_id("4").is_none());
        assert_eq!(cache.id_for_code("b").as_deref(), Some("2"));
    }

    #[test]
    fn new_cache_is_empty() {
        assert!(CourseCache::new().is_empty());
    }
}
