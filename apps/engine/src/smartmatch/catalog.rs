//! Static case-study catalog the matcher ranks against. Immutable reference
//! data; every entry carries the four tags the profile is scored on plus the
//! uplift estimate fed into recommendation synthesis.

use serde::Serialize;

use crate::smartmatch::profile::{ChannelBucket, FocusBucket, SizeBucket, SoftwareBucket};

/// Categorical tags attached to one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseTags {
    pub size: SizeBucket,
    pub channel: ChannelBucket,
    pub focus: FocusBucket,
    pub software: SoftwareBucket,
}

/// Headline metric of a case study, kept as display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseMetric {
    pub label: &'static str,
    pub delta: &'static str,
}

/// One reference customer story.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CaseStudy {
    pub name: &'static str,
    pub context: &'static str,
    pub tags: CaseTags,
    pub lever: &'static str,
    pub metric: CaseMetric,
    /// Observed improvement, in percent. Feeds the blended uplift estimate.
    pub uplift: u8,
}

/// The reference catalog, in editorial order. Ties in match score keep this
/// order, so the ordering is part of the contract.
pub const CATALOG: [CaseStudy; 6] = [
    CaseStudy {
        name: "Studio Aurora",
        context: "Studio dentistico con 5 poltrone, agenda gestita a voce dalla segreteria.",
        tags: CaseTags {
            size: SizeBucket::S,
            channel: ChannelBucket::Telefono,
            focus: FocusBucket::Prenotazioni,
            software: SoftwareBucket::Nessuno,
        },
        lever: "Promemoria automatici e conferma della prenotazione con un tocco.",
        metric: CaseMetric {
            label: "No-show",
            delta: "-35%",
        },
        uplift: 18,
    },
    CaseStudy {
        name: "Clinica Borgo",
        context: "Clinica polispecialistica da 12 operatori con Gipo già in uso per la fatturazione.",
        tags: CaseTags {
            size: SizeBucket::M,
            channel: ChannelBucket::Telefono,
            focus: FocusBucket::Processi,
            software: SoftwareBucket::Gipo,
        },
        lever: "Flussi di segreteria centralizzati sul CRM e agenda condivisa tra le sale.",
        metric: CaseMetric {
            label: "Tempo di segreteria",
            delta: "-40%",
        },
        uplift: 22,
    },
    CaseStudy {
        name: "Poliambulatorio Da Vinci",
        context: "Poliambulatorio con 25 specialisti, visibilità affidata al solo profilo MioDottore.",
        tags: CaseTags {
            size: SizeBucket::L,
            channel: ChannelBucket::MioDottore,
            focus: FocusBucket::Visibilita,
            software: SoftwareBucket::Altro,
        },
        lever: "Scheda struttura potenziata e campagne di recensioni verificate.",
        metric: CaseMetric {
            label: "Nuovi pazienti",
            delta: "+25%",
        },
        uplift: 25,
    },
    CaseStudy {
        name: "Centro Esculapio",
        context: "Centro medico di medie dimensioni con le prenotazioni in arrivo dal portale.",
        tags: CaseTags {
            size: SizeBucket::M,
            channel: ChannelBucket::MioDottore,
            focus: FocusBucket::Prenotazioni,
            software: SoftwareBucket::Altro,
        },
        lever: "Agenda online aperta ai pazienti con slot in tempo reale.",
        metric: CaseMetric {
            label: "Prenotazioni online",
            delta: "+30%",
        },
        uplift: 20,
    },
    CaseStudy {
        name: "Studio Iride",
        context: "Studio oculistico a conduzione familiare con sito vetrina poco aggiornato.",
        tags: CaseTags {
            size: SizeBucket::S,
            channel: ChannelBucket::SitoWeb,
            focus: FocusBucket::Visibilita,
            software: SoftwareBucket::Nessuno,
        },
        lever: "Sito rinnovato con modulo di richiesta visita e indicizzazione locale.",
        metric: CaseMetric {
            label: "Richieste dal sito",
            delta: "+45%",
        },
        uplift: 15,
    },
    CaseStudy {
        name: "Casa di Cura Levante",
        context: "Casa di cura con 40 dipendenti e processi interni frammentati su più gestionali.",
        tags: CaseTags {
            size: SizeBucket::L,
            channel: ChannelBucket::SitoWeb,
            focus: FocusBucket::Processi,
            software: SoftwareBucket::Gipo,
        },
        lever: "Migrazione a un gestionale unico con reportistica direzionale.",
        metric: CaseMetric {
            label: "Tempi di attesa",
            delta: "-28%",
        },
        uplift: 30,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_catalog_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for case in &CATALOG {
            assert!(seen.insert(case.name), "duplicate case name {}", case.name);
        }
    }

    #[test]
    fn test_catalog_covers_each_focus_twice() {
        let mut counts: HashMap<FocusBucket, usize> = HashMap::new();
        for case in &CATALOG {
            *counts.entry(case.tags.focus).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 3, "all three focus buckets represented");
        for (focus, count) in counts {
            assert_eq!(count, 2, "focus {focus:?} must appear twice");
        }
    }

    #[test]
    fn test_catalog_uplifts_fit_the_clamp_band() {
        for case in &CATALOG {
            assert!(
                (8..=35).contains(&case.uplift),
                "{} uplift {} outside band",
                case.name,
                case.uplift
            );
        }
    }
}
