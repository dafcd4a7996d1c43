use super::chart::{OutcomeChart, ProportionCategory, ProportionSlice};
use super::filter::SiteSelection;
use super::model::{LaunchDataset, OutcomeClass};

// ---------------------------------------------------------------------------
// Proportion view data
// ---------------------------------------------------------------------------

/// Group launch outcomes for the pie chart.
///
/// * All sites: one slice per site present in the data, counting its
///   *successful* launches (a site with only failures gets a zero slice).
///   Sites appear in first-seen order.
/// * One site: that site's launches split by outcome class, one slice per
///   class present, failure before success.
///
/// A selection with no matching records yields an empty chart.
pub fn aggregate_outcomes(dataset: &LaunchDataset, site: &SiteSelection) -> OutcomeChart {
    let slices = match site {
        SiteSelection::All => successes_per_site(dataset),
        SiteSelection::Site(name) => outcomes_for_site(dataset, name),
    };

    OutcomeChart {
        title: OutcomeChart::title_for(site),
        slices,
    }
}

fn successes_per_site(dataset: &LaunchDataset) -> Vec<ProportionSlice> {
    let mut slices: Vec<ProportionSlice> = Vec::new();
    for rec in dataset {
        let success = u64::from(rec.outcome.value());
        match slices
            .iter_mut()
            .find(|s| matches!(&s.category, ProportionCategory::Site(site) if *site == rec.launch_site))
        {
            Some(slice) => slice.count += success,
            None => slices.push(ProportionSlice {
                category: ProportionCategory::Site(rec.launch_site.clone()),
                count: success,
            }),
        }
    }
    slices
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> Vec<ProportionSlice> {
    let mut counts = [0u64; 2];
    for rec in dataset.iter().filter(|rec| rec.launch_site == site) {
        counts[usize::from(rec.outcome.value())] += 1;
    }

    [OutcomeClass::Failure, OutcomeClass::Success]
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(class, count)| ProportionSlice {
            category: ProportionCategory::Outcome(class),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, scenario_dataset};

    fn site(name: &str) -> ProportionCategory {
        ProportionCategory::Site(name.to_string())
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let chart = aggregate_outcomes(&scenario_dataset(), &SiteSelection::All);
        assert_eq!(chart.title, "Total Success Launches By Site");
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.count_of(&site("KSC LC-39A")), Some(1));
        assert_eq!(chart.count_of(&site("VAFB SLC-4E")), Some(1));
        assert_eq!(chart.slices[0].category, site("KSC LC-39A"));
    }

    #[test]
    fn single_site_splits_by_outcome_class() {
        let selected = SiteSelection::Site("KSC LC-39A".into());
        let chart = aggregate_outcomes(&scenario_dataset(), &selected);
        assert_eq!(chart.title, "Total Success Launches for Site KSC LC-39A");
        assert_eq!(
            chart.count_of(&ProportionCategory::Outcome(OutcomeClass::Failure)),
            Some(1)
        );
        assert_eq!(
            chart.count_of(&ProportionCategory::Outcome(OutcomeClass::Success)),
            Some(1)
        );
        assert_eq!(chart.total(), 2);
    }

    #[test]
    fn single_site_omits_absent_classes() {
        let selected = SiteSelection::Site("VAFB SLC-4E".into());
        let chart = aggregate_outcomes(&scenario_dataset(), &selected);
        assert_eq!(
            chart.slices,
            vec![ProportionSlice {
                category: ProportionCategory::Outcome(OutcomeClass::Success),
                count: 1,
            }]
        );
    }

    #[test]
    fn site_without_successes_still_gets_a_slice() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", OutcomeClass::Failure, 500.0, "v1.0"),
            LaunchRecord::new("KSC LC-39A", OutcomeClass::Success, 5000.0, "FT"),
            LaunchRecord::new("CCAFS LC-40", OutcomeClass::Failure, 700.0, "v1.0"),
        ]);
        let chart = aggregate_outcomes(&ds, &SiteSelection::All);
        assert_eq!(chart.count_of(&site("CCAFS LC-40")), Some(0));
        assert_eq!(chart.count_of(&site("KSC LC-39A")), Some(1));
        assert_eq!(chart.fractions(), vec![0.0, 1.0]);
    }

    #[test]
    fn one_slice_per_distinct_site() {
        let ds = scenario_dataset();
        let chart = aggregate_outcomes(&ds, &SiteSelection::All);
        let labels: Vec<String> = chart.slices.iter().map(|s| s.category.to_string()).collect();
        assert_eq!(labels, ds.sites());
        assert!(chart.total() <= ds.len() as u64);
    }

    #[test]
    fn single_site_counts_sum_to_matching_records() {
        let ds = scenario_dataset();
        for name in ds.sites() {
            let chart = aggregate_outcomes(&ds, &SiteSelection::Site(name.clone()));
            let matching = ds.iter().filter(|r| &r.launch_site == name).count() as u64;
            assert_eq!(chart.total(), matching);
        }
    }

    #[test]
    fn missing_site_or_empty_dataset_gives_empty_chart() {
        let missing = SiteSelection::Site("CCAFS SLC-40".into());
        assert!(aggregate_outcomes(&scenario_dataset(), &missing).is_empty());

        let empty = LaunchDataset::default();
        assert!(aggregate_outcomes(&empty, &SiteSelection::All).is_empty());
        assert!(aggregate_outcomes(&empty, &missing).is_empty());
    }

    #[test]
    fn aggregation_is_repeatable_and_thread_safe() {
        let ds = scenario_dataset();
        let first = aggregate_outcomes(&ds, &SiteSelection::All);
        let second = std::thread::scope(|s| {
            s.spawn(|| aggregate_outcomes(&ds, &SiteSelection::All))
                .join()
                .unwrap()
        });
        assert_eq!(first, second);
    }
}
