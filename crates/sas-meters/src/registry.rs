//! # Meter Registry
//!
//! The per-session collection of meters a gaming machine reports to its
//! host, plus the two counters the secure-enhanced validation-number
//! generator reads.
//!
//! ## Ownership
//!
//! The registry exclusively owns its meters. Lookup is an explicit map by
//! name or by code; there are no per-meter accessors generated from the
//! catalog. All mutation goes through `&mut self`, so a registry shared
//! between threads must be wrapped in a lock by the caller.
//!
//! ## Validation Counters
//!
//! `validation_id` and `validation_sequence` start at zero and are expected
//! to be assigned by the host before a validation number is generated. Both
//! are `Counter24`, so assignment rejects values of 2^24 or more.

use std::collections::BTreeMap;
use std::path::Path;

use sas_core::{Counter24, MeterCode, SasError, SasResult};

use crate::catalog::MeterCatalog;
use crate::error::CatalogResult;
use crate::meter::{Meter, MAX_WIDTH};

/// Meters for one logical game session, keyed by name and by code.
#[derive(Debug, Clone)]
pub struct MeterRegistry {
    meters: Vec<Meter>,
    by_name: BTreeMap<String, usize>,
    by_code: BTreeMap<MeterCode, usize>,
    validation_id: Counter24,
    validation_sequence: Counter24,
}

impl MeterRegistry {
    /// Build a registry from a catalog.
    ///
    /// Leading underscores are stripped from each name before it is assigned
    /// (and truncated to 50 characters). Catalog order is kept for iteration.
    ///
    /// # Errors
    ///
    /// - `SasError::DuplicateMeter` if two entries end up with the same name
    ///   or share a code.
    /// - `SasError::InvalidArgument` if a name is empty after stripping or an
    ///   entry is wider than [`MAX_WIDTH`] bytes. Zero-width entries are kept.
    pub fn build(catalog: &MeterCatalog) -> SasResult<Self> {
        let mut meters = Vec::with_capacity(catalog.len());
        let mut by_name = BTreeMap::new();
        let mut by_code = BTreeMap::new();

        for entry in catalog.entries() {
            let stripped = entry.name.trim_start_matches('_');
            if stripped.is_empty() {
                return Err(SasError::InvalidArgument(format!(
                    "meter {} has no name after stripping {:?}",
                    entry.id, entry.name
                )));
            }
            if entry.size > MAX_WIDTH {
                return Err(SasError::InvalidArgument(format!(
                    "meter {stripped} width {} exceeds {MAX_WIDTH} bytes",
                    entry.size
                )));
            }

            let mut meter = Meter::new(entry.id, entry.size);
            meter.set_name(stripped);
            meter.set_description(entry.description.clone());
            if meter.name() != entry.name {
                tracing::warn!(
                    catalog_name = %entry.name,
                    name = %meter.name(),
                    "meter name normalized"
                );
            }

            let index = meters.len();
            if by_name.insert(meter.name().to_string(), index).is_some() {
                return Err(SasError::DuplicateMeter(format!(
                    "name {:?} appears more than once",
                    meter.name()
                )));
            }
            if by_code.insert(entry.id, index).is_some() {
                return Err(SasError::DuplicateMeter(format!(
                    "code {} appears more than once",
                    entry.id
                )));
            }
            meters.push(meter);
        }

        tracing::debug!(meters = meters.len(), "meter registry built");
        Ok(Self {
            meters,
            by_name,
            by_code,
            validation_id: Counter24::ZERO,
            validation_sequence: Counter24::ZERO,
        })
    }

    /// Load a catalog file and build a registry from it.
    pub fn from_catalog_file(path: &Path) -> CatalogResult<Self> {
        let catalog = MeterCatalog::load(path)?;
        Ok(Self::build(&catalog)?)
    }

    /// Look up a meter by name.
    pub fn get(&self, name: &str) -> Option<&Meter> {
        self.by_name.get(name).map(|&i| &self.meters[i])
    }

    /// Look up a meter by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Meter> {
        let i = *self.by_name.get(name)?;
        self.meters.get_mut(i)
    }

    /// Look up a meter by protocol code.
    pub fn by_code(&self, code: MeterCode) -> Option<&Meter> {
        self.by_code.get(&code).map(|&i| &self.meters[i])
    }

    /// Look up a meter by protocol code for mutation.
    pub fn by_code_mut(&mut self, code: MeterCode) -> Option<&mut Meter> {
        let i = *self.by_code.get(&code)?;
        self.meters.get_mut(i)
    }

    /// Meters in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Meter> {
        self.meters.iter()
    }

    /// Number of meters.
    pub fn len(&self) -> usize {
        self.meters.len()
    }

    /// Returns true if the registry holds no meters.
    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    /// Host-assigned validation id.
    pub fn validation_id(&self) -> Counter24 {
        self.validation_id
    }

    /// Host-assigned validation sequence number.
    pub fn validation_sequence(&self) -> Counter24 {
        self.validation_sequence
    }

    /// Assign the validation id.
    ///
    /// # Errors
    ///
    /// Returns `SasError::InvalidArgument` if `id` does not fit in 24 bits.
    pub fn set_validation_id(&mut self, id: u32) -> SasResult<()> {
        self.validation_id = Counter24::new(id)?;
        tracing::debug!(validation_id = id, "validation id assigned");
        Ok(())
    }

    /// Assign the validation sequence number.
    ///
    /// # Errors
    ///
    /// Returns `SasError::InvalidArgument` if `sequence` does not fit in 24 bits.
    pub fn set_validation_sequence(&mut self, sequence: u32) -> SasResult<()> {
        self.validation_sequence = Counter24::new(sequence)?;
        tracing::debug!(validation_sequence = sequence, "validation sequence assigned");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MeterRegistry {
    type Item = &'a Meter;
    type IntoIter = std::slice::Iter<'a, Meter>;

    fn into_iter(self) -> Self::IntoIter {
        self.meters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::meter::MeterUpdate;

    fn registry() -> MeterRegistry {
        MeterRegistry::build(&MeterCatalog::sas_602()).unwrap()
    }

    #[test]
    fn builds_default_catalog() {
        let r = registry();
        assert_eq!(r.len(), 2);
        let coin_in = r.get("coin_in").unwrap();
        assert_eq!(coin_in.code(), MeterCode(0));
        assert_eq!(coin_in.size(), 4);
        assert_eq!(coin_in.description(), "Total coin in credits");
        assert_eq!(r.by_code(MeterCode(1)).unwrap().name(), "coin_out");
    }

    #[test]
    fn unknown_lookups_are_none() {
        let mut r = registry();
        assert!(r.get("jackpot").is_none());
        assert!(r.get_mut("jackpot").is_none());
        assert!(r.by_code(MeterCode(0x7f)).is_none());
        assert!(r.by_code_mut(MeterCode(0x7f)).is_none());
    }

    #[test]
    fn iteration_keeps_catalog_order() {
        let catalog = MeterCatalog::new(vec![
            CatalogEntry::new(0x05, 4, "zeta", ""),
            CatalogEntry::new(0x02, 4, "alpha", ""),
        ]);
        let r = MeterRegistry::build(&catalog).unwrap();
        let names: Vec<&str> = r.iter().map(Meter::name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!((&r).into_iter().count(), 2);
    }

    #[test]
    fn leading_underscores_stripped() {
        let catalog = MeterCatalog::new(vec![CatalogEntry::new(0x00, 4, "__coin_in", "")]);
        let r = MeterRegistry::build(&catalog).unwrap();
        assert!(r.get("coin_in").is_some());
        assert!(r.get("__coin_in").is_none());
    }

    #[test]
    fn long_names_keyed_by_truncated_name() {
        let long = "m".repeat(60);
        let catalog = MeterCatalog::new(vec![CatalogEntry::new(0x00, 4, long, "")]);
        let r = MeterRegistry::build(&catalog).unwrap();
        assert!(r.get(&"m".repeat(50)).is_some());
    }

    #[test]
    fn duplicate_names_rejected() {
        let catalog = MeterCatalog::new(vec![
            CatalogEntry::new(0x00, 4, "coin_in", ""),
            CatalogEntry::new(0x01, 4, "_coin_in", ""),
        ]);
        assert!(matches!(
            MeterRegistry::build(&catalog),
            Err(SasError::DuplicateMeter(_))
        ));
    }

    #[test]
    fn duplicate_codes_rejected() {
        let catalog = MeterCatalog::new(vec![
            CatalogEntry::new(0x00, 4, "coin_in", ""),
            CatalogEntry::new(0x00, 4, "coin_out", ""),
        ]);
        assert!(matches!(
            MeterRegistry::build(&catalog),
            Err(SasError::DuplicateMeter(_))
        ));
    }

    #[test]
    fn empty_name_rejected() {
        let catalog = MeterCatalog::new(vec![CatalogEntry::new(0x00, 4, "___", "")]);
        assert!(matches!(
            MeterRegistry::build(&catalog),
            Err(SasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_width_meter_serializes_empty() {
        let catalog = MeterCatalog::new(vec![CatalogEntry::new(0x00, 0, "coin_in", "")]);
        let r = MeterRegistry::build(&catalog).unwrap();
        assert!(r.get("coin_in").unwrap().serialize().unwrap().is_empty());
    }

    #[test]
    fn oversized_width_from_catalog_rejected() {
        let catalog =
            MeterCatalog::from_json_str(r#"[[0, 9223372036854775808, "coin_in", ""]]"#).unwrap();
        assert!(matches!(
            MeterRegistry::build(&catalog),
            Err(SasError::InvalidArgument(_))
        ));

        let widest = MeterCatalog::new(vec![CatalogEntry::new(0x00, MAX_WIDTH, "coin_in", "")]);
        assert!(MeterRegistry::build(&widest).is_ok());
    }

    #[test]
    fn empty_catalog_builds_empty_registry() {
        let r = MeterRegistry::build(&MeterCatalog::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn mutation_through_lookup() {
        let mut r = registry();
        let m = r.get_mut("coin_in").unwrap();
        assert_eq!(m.increment(25), MeterUpdate::Applied);
        assert_eq!(r.by_code_mut(MeterCode(0)).unwrap().set(10), MeterUpdate::Ignored);
        assert_eq!(r.get("coin_in").unwrap().value(), 25);
        assert_eq!(r.get("coin_out").unwrap().value(), 0);
    }

    #[test]
    fn registries_are_independent() {
        let mut a = registry();
        let b = registry();
        a.get_mut("coin_in").unwrap().set(5);
        assert_eq!(b.get("coin_in").unwrap().value(), 0);
    }

    #[test]
    fn validation_counters_default_zero() {
        let r = registry();
        assert_eq!(r.validation_id(), Counter24::ZERO);
        assert_eq!(r.validation_sequence(), Counter24::ZERO);
    }

    #[test]
    fn validation_counters_enforce_24_bits() {
        let mut r = registry();
        r.set_validation_id(0xff_ffff).unwrap();
        r.set_validation_sequence(42).unwrap();
        assert_eq!(r.validation_id().get(), 0xff_ffff);
        assert_eq!(r.validation_sequence().get(), 42);

        assert!(r.set_validation_id(1 << 24).is_err());
        assert!(r.set_validation_sequence(u32::MAX).is_err());
        // Rejected assignments leave the previous values in place.
        assert_eq!(r.validation_id().get(), 0xff_ffff);
        assert_eq!(r.validation_sequence().get(), 42);
    }
}
