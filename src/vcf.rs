use std::fmt;
use std::path::Path;

use ahash::AHashSet as HashSet;
use anyhow::{Context, Result};
use rust_htslib::bcf::{self, Read};
use rust_htslib::bcf::record::GenotypeAllele;


#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhasingSummary {
    pub records: usize,
    pub phased: usize,
    pub phase_sets: usize,
}

impl fmt::Display for PhasingSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} of {} variants phased in {} phase sets", self.phased, self.records, self.phase_sets)
    }
}


/// Counts phased genotypes (first sample) and distinct FORMAT/PS values.
pub fn summarize(vcf_path: &Path) -> Result<PhasingSummary> {

    let mut reader = bcf::Reader::from_path(vcf_path)
        .with_context(|| format!("cannot open VCF file: \"{}\"", vcf_path.display()))?;
    let has_samples = reader.header().sample_count() > 0;

    let mut summary = PhasingSummary::default();
    let mut phase_sets: HashSet<i32> = HashSet::new();

    for record in reader.records() {
        let record = record.with_context(|| format!("malformed record in \"{}\"", vcf_path.display()))?;
        summary.records += 1;
        if !has_samples {
            continue
        }

        // records without GT count as unphased
        let Ok(genotypes) = record.genotypes() else {
            continue
        };
        let genotype = genotypes.get(0);
        // the first allele never carries the phase bit
        if !genotype.iter().skip(1).any(|allele| matches!(allele, GenotypeAllele::Phased(_))) {
            continue
        }
        summary.phased += 1;

        if let Ok(ps) = record.format(b"PS").integer() {
            if let Some(&id) = ps.first().and_then(|values| values.first()) {
                phase_sets.insert(id);
            }
        }
    }

    summary.phase_sets = phase_sets.len();
    Ok(summary)
}
