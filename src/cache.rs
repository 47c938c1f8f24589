//! Statistics keyed by the content fingerprint of the survey table.
//!
//! Entries are only dropped through [`StatsCache::invalidate`] or
//! [`StatsCache::clear`].

use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::Result;
use log::debug;

use crate::{stats::SurveyStatistics, survey::SurveyTable};

#[derive(Debug, Default)]
pub struct StatsCache {
    entries: HashMap<String, Arc<SurveyStatistics>>,
    hits: u64,
    misses: u64,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, survey: &SurveyTable) -> Arc<SurveyStatistics> {
        let key = survey.fingerprint();
        if let Some(found) = self.lookup(&key) {
            return found;
        }
        self.insert(key, SurveyStatistics::compute(survey))
    }

    /// Like [`StatsCache::get_or_compute`] with a fallible producer, used to
    /// cache statistics with overrides applied.
    pub fn get_or_try_compute<F>(
        &mut self,
        survey: &SurveyTable,
        compute: F,
    ) -> Result<Arc<SurveyStatistics>>
    where
        F: FnOnce(&SurveyTable) -> Result<SurveyStatistics>,
    {
        let key = survey.fingerprint();
        if let Some(found) = self.lookup(&key) {
            return Ok(found);
        }
        Ok(self.insert(key, compute(survey)?))
    }

    fn lookup(&mut self, key: &str) -> Option<Arc<SurveyStatistics>> {
        match self.entries.get(key) {
            Some(found) => {
                self.hits += 1;
                debug!("Statistics cache hit for {key}");
                Some(Arc::clone(found))
            }
            None => {
                self.misses += 1;
                debug!("Statistics cache miss for {key}");
                None
            }
        }
    }

    fn insert(&mut self, key: String, statistics: SurveyStatistics) -> Arc<SurveyStatistics> {
        let shared = Arc::new(statistics);
        self.entries.insert(key, Arc::clone(&shared));
        shared
    }

    pub fn get(&self, fingerprint: &str) -> Option<Arc<SurveyStatistics>> {
        self.entries.get(fingerprint).cloned()
    }

    pub fn invalidate(&mut self, fingerprint: &str) -> bool {
        self.entries.remove(fingerprint).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Cache plus the override file applied to every entry it computes.
#[derive(Debug, Default)]
pub struct ReportCache<'a> {
    cache: StatsCache,
    overrides: Option<&'a Path>,
}

impl<'a> ReportCache<'a> {
    pub fn new(overrides: Option<&'a Path>) -> Self {
        Self {
            cache: StatsCache::new(),
            overrides,
        }
    }

    pub fn statistics(&mut self, survey: &SurveyTable) -> Result<Arc<SurveyStatistics>> {
        let overrides = self.overrides;
        self.cache.get_or_try_compute(survey, |s| {
            crate::stats::compute_with_overrides(s, overrides)
        })
    }

    pub fn inner(&self) -> &StatsCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::Field;

    fn survey(values: Vec<Option<f64>>) -> SurveyTable {
        let mut table = SurveyTable::new(values.len());
        table
            .push_field(Field::salary("salario_ceo", values))
            .unwrap();
        table
    }

    #[test]
    fn identical_content_shares_statistics() {
        let mut cache = StatsCache::new();
        let first = cache.get_or_compute(&survey(vec![Some(1.0), Some(2.0)]));
        let second = cache.get_or_compute(&survey(vec![Some(1.0), Some(2.0)]));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_content_gets_own_entry() {
        let mut cache = StatsCache::new();
        cache.get_or_compute(&survey(vec![Some(1.0)]));
        cache.get_or_compute(&survey(vec![Some(2.0)]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidation_forces_recompute() {
        let mut cache = StatsCache::new();
        let table = survey(vec![Some(1.0)]);
        let first = cache.get_or_compute(&table);
        let key = table.fingerprint();
        assert!(cache.get(&key).is_some());
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));
        let second = cache.get_or_compute(&table);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_producer_leaves_no_entry() {
        let mut cache = StatsCache::new();
        let result = cache.get_or_try_compute(&survey(vec![Some(1.0)]), |_| {
            Err(anyhow::anyhow!("overrides unreadable"))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
