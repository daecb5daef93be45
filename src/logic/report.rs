use crate::model::{CollectionCounts, IndexManifest, INDEX_FILE, RELATIONS_FILE};

const MIGRATION_RULES: [&str; 6] = [
    "Each legacy herb becomes exactly one Material; its legacy id is kept.",
    "Each declared processing method becomes one Slice; a herb without processing gets one raw (净制) Slice.",
    "A herb with compatibility data seeds one Formula from its first combination, referencing the last Slice of that herb's Material.",
    "Origins map to authentic regions, enriched from detailed origin entries by exact province match.",
    "Chemical components, pharmacology and quality indicators keep their source structure.",
    "Granule, granule formula and patent medicine collections are written empty.",
];

const FOLLOW_UP_NOTES: [&str; 3] = [
    "Material Latin names are often missing and need to be filled in.",
    "Seeded formulas carry a placeholder pinyin and a single 10 g component; review them by hand.",
    "Run `tcm-migrate --validate` after any manual edit to the output files.",
];

/// Render `MIGRATION_REPORT.md`. For human audit only; nothing reads it back.
pub fn render_report(manifest: &IndexManifest, legacy_count: usize) -> String {
    let counts = &manifest.counts;
    let mut lines = vec![
        "# Migration Report".to_string(),
        String::new(),
        format!("- Generated: {}", manifest.created_at.to_rfc3339()),
        format!("- Run: {}", manifest.run_id),
        format!("- Schema version: {}", manifest.version),
        String::new(),
        "## Counts".to_string(),
        String::new(),
        format!("- Legacy herbs read: {}", legacy_count),
    ];
    lines.extend(count_lines(counts));

    lines.push(String::new());
    lines.push("## Files".to_string());
    lines.push(String::new());
    for file in &manifest.files {
        match counts.for_file(file) {
            Some(count) => lines.push(format!("- {} ({} records)", file, count)),
            None => lines.push(format!("- {}", file)),
        }
    }
    lines.push(format!("- {} (manifest)", INDEX_FILE));
    lines.push(format!("- {} (relation index)", RELATIONS_FILE));

    lines.push(String::new());
    lines.push("## Migration Rules".to_string());
    lines.push(String::new());
    lines.extend(
        MIGRATION_RULES
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {}", i + 1, rule)),
    );

    lines.push(String::new());
    lines.push("## Notes".to_string());
    lines.push(String::new());
    lines.extend(FOLLOW_UP_NOTES.iter().map(|note| format!("- {}", note)));
    lines.push(String::new());

    lines.join("\n")
}

fn count_lines(counts: &CollectionCounts) -> Vec<String> {
    [
        ("Materials", counts.materials),
        ("Slices", counts.slices),
        ("Formulas", counts.formulas),
        ("Granule ingredients", counts.granules),
        ("Granule formulas", counts.granule_formulas),
        ("Patent medicines", counts.medicines),
    ]
    .iter()
    .map(|(label, count)| format!("- {}: {}", label, count))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{COLLECTION_FILES, MATERIALS_FILE};
    use chrono::DateTime;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    #[test]
    fn test_report_lists_counts_and_files() {
        let manifest = IndexManifest {
            version: "1.0.0".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            run_id: Uuid::nil(),
            counts: CollectionCounts {
                materials: 2,
                slices: 3,
                formulas: 1,
                ..Default::default()
            },
            files: COLLECTION_FILES.iter().map(|f| f.to_string()).collect(),
            checksums: BTreeMap::new(),
        };

        let report = render_report(&manifest, 2);
        assert!(report.starts_with("# Migration Report"));
        assert!(report.contains("- Legacy herbs read: 2"));
        assert!(report.contains("- Slices: 3"));
        assert!(report.contains(&format!("- {} (2 records)", MATERIALS_FILE)));
        assert!(report.contains("- granule-formulas.json (0 records)"));
        assert!(report.contains("- relations.json (relation index)"));
        assert!(report.contains("6. Granule, granule formula"));
    }
}
