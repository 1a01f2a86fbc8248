//! Defect class labels
//!
//! Static lookup table mapping the detector's integer class ids to
//! human-readable weld-defect names. Classes 6-8 are calibration
//! reference marks present on the film, not defects, but they are
//! reported like any other class.

/// Name for a known class id.
pub fn defect_name(class_id: u32) -> Option<&'static str> {
    match class_id {
        0 => Some("pore"),
        1 => Some("inclusion"),
        2 => Some("undercut"),
        3 => Some("burn-through"),
        4 => Some("crack"),
        5 => Some("overlap"),
        6 => Some("reference-1"),
        7 => Some("reference-2"),
        8 => Some("reference-3"),
        9 => Some("hidden-pore"),
        10 => Some("concavity"),
        11 => Some("lack-of-fusion"),
        12 => Some("incomplete-root-penetration"),
        _ => None,
    }
}

/// Name for a class id, falling back to the stringified id for classes
/// the table does not know. Never fails: an unknown id is a reporting
/// inconvenience, not an error.
pub fn defect_label(class_id: u32) -> String {
    match defect_name(class_id) {
        Some(name) => name.to_string(),
        None => class_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(defect_label(0), "pore");
        assert_eq!(defect_label(12), "incomplete-root-penetration");
    }

    #[test]
    fn test_unknown_id_falls_back() {
        assert_eq!(defect_name(13), None);
        assert_eq!(defect_label(13), "13");
        assert_eq!(defect_label(u32::MAX), u32::MAX.to_string());
    }
}
