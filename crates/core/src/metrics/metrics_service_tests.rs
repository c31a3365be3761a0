#[cfg(test)]
mod tests {
    use crate::errors::{Error, LoadError, Result};
    use crate::metrics::{MetricsService, MetricsServiceTrait, MetricsSettings};
    use crate::records::{ClientProfile, ClientRecord, InflowEvent, RecordStoreTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::sync::Arc;

    // --- Mock RecordStore ---
    #[derive(Clone, Default)]
    struct MockRecordStore {
        clients: Option<Vec<ClientRecord>>,
        inflows: Option<Vec<InflowEvent>>,
        profiles: Option<Vec<ClientProfile>>,
    }

    fn unavailable<T>(source: &str) -> Result<T> {
        Err(LoadError::Unreadable {
            path: source.to_string(),
            reason: "not found".to_string(),
        }
        .into())
    }

    impl RecordStoreTrait for MockRecordStore {
        fn load_client_records(&self) -> Result<Vec<ClientRecord>> {
            self.clients.clone().map_or_else(|| unavailable("pl.json"), Ok)
        }

        fn load_inflow_events(&self) -> Result<Vec<InflowEvent>> {
            self.inflows
                .clone()
                .map_or_else(|| unavailable("net_inflow.json"), Ok)
        }

        fn load_client_profiles(&self) -> Result<Vec<ClientProfile>> {
            self.profiles
                .clone()
                .map_or_else(|| unavailable("cliente_perfil.txt"), Ok)
        }
    }

    // --- Fixtures ---

    fn record(value: Value) -> ClientRecord {
        ClientRecord::from_row(value.as_object().unwrap())
    }

    fn inflow(client: &str, date: &str, amount: Decimal) -> InflowEvent {
        InflowEvent {
            client_name: client.to_string(),
            date: date.to_string(),
            amount_usd: amount,
        }
    }

    fn profile(name: &str, banker: &str, email: &str) -> ClientProfile {
        ClientProfile {
            name: name.to_string(),
            banker_name: Some(banker.to_string()),
            email: Some(email.to_string()),
        }
    }

    fn fixture_store() -> MockRecordStore {
        MockRecordStore {
            clients: Some(vec![
                record(json!({
                    "Cliente": "Alice", "CPF": "111", "Banker": "Bruno",
                    "2025-11-30": 90, "2025-12-01": 100, "2025-12-02": 110, "2025-12-03": 120
                })),
                record(json!({"Cliente": "Bob", "CPF": "222", "2025-12-01": 50, "2025-12-03": null})),
                record(json!({
                    "Cliente": "Carol", "CPF": "333", "Banker": "Alan Souza",
                    "2025-12-02": 300, "2025-12-03": 310
                })),
                record(json!({"Cliente": "Dave", "CPF": "444", "Banker": "Bruno", "2025-12-03": 40})),
            ]),
            inflows: Some(vec![
                inflow("Alice", "2025-12-02", dec!(20)),
                inflow("Bob", "2025-12-03", dec!(10)),
                inflow("Bob", "2025-12-03", dec!(-5)),
                inflow("Carol", "2025-12-03", dec!(100)),
                inflow("Ghost", "2025-12-03", dec!(999)),
            ]),
            profiles: Some(vec![
                profile("Alice", "Bruno", "alice@example.com"),
                profile("Bob", "Carla", "bob@example.com"),
            ]),
        }
    }

    fn service(store: MockRecordStore) -> MetricsService {
        MetricsService::new(Arc::new(store), MetricsSettings::default())
    }

    // --- Totals and stats ---

    #[test]
    fn test_total_series_is_tracked_and_rounded() {
        let envelope = service(fixture_store()).get_total_series().unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.count, 3);
        assert_eq!(envelope.start_date.as_deref(), Some("2025-12-01"));
        assert_eq!(envelope.end_date.as_deref(), Some("2025-12-03"));
        let values: Vec<Decimal> = envelope.data.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(150), dec!(410), dec!(470)]);
    }

    #[test]
    fn test_total_series_rounds_after_summing() {
        let store = MockRecordStore {
            clients: Some(vec![
                record(json!({"Cliente": "A", "2025-12-01": "0.004"})),
                record(json!({"Cliente": "B", "2025-12-01": "0.004"})),
                record(json!({"Cliente": "C", "2025-12-01": "0.004"})),
            ]),
            inflows: Some(vec![]),
            profiles: Some(vec![]),
        };

        let envelope = service(store).get_total_series().unwrap();

        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].value, dec!(0.01));
    }

    #[test]
    fn test_stats() {
        let envelope = service(fixture_store()).get_stats().unwrap();

        assert_eq!(envelope.data.max, dec!(470));
        assert_eq!(envelope.data.min, dec!(150));
        assert_eq!(envelope.data.average, dec!(343.33));
        assert_eq!(envelope.data.total_clients, 4);
        assert_eq!(envelope.data.total_days, 3);
    }

    #[test]
    fn test_period_before_tracking_start() {
        let store = MockRecordStore {
            clients: Some(vec![record(json!({"Cliente": "A", "2025-11-01": 10}))]),
            ..Default::default()
        };
        let service = service(store);

        let totals = service.get_total_series().unwrap();
        assert!(totals.data.is_empty());
        assert_eq!(totals.start_date, None);

        assert!(matches!(service.get_stats(), Err(Error::NoData)));
    }

    // --- Clients ---

    #[test]
    fn test_clients_latest_joins_email_and_skips_nulls() {
        let envelope = service(fixture_store()).get_clients_latest().unwrap();

        let names: Vec<&str> = envelope.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol", "Dave"]);
        assert_eq!(envelope.count, 3);
        assert_eq!(envelope.start_date.as_deref(), Some("2025-12-03"));

        let alice = &envelope.data[0];
        assert_eq!(alice.tax_id, "111");
        assert_eq!(alice.banker, "Bruno");
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.value, dec!(120));
        assert_eq!(alice.date, "2025-12-03");
        assert_eq!(envelope.data[2].email, "");
    }

    #[test]
    fn test_clients_evolution() {
        let envelope = service(fixture_store()).get_clients_evolution().unwrap();

        assert_eq!(envelope.count, 4);
        assert_eq!(envelope.start_date.as_deref(), Some("2025-11-30"));
        assert_eq!(envelope.end_date.as_deref(), Some("2025-12-03"));

        let alice = &envelope.data[0];
        assert_eq!(alice.evolution.len(), 4);
        assert_eq!(alice.initial_value, dec!(90));
        assert_eq!(alice.final_value, dec!(120));
        assert_eq!(alice.variation, dec!(30));

        let bob = &envelope.data[1];
        assert_eq!(bob.banker, "Carla");
        assert_eq!(bob.email, "bob@example.com");
        assert_eq!(bob.evolution.len(), 1);
        assert_eq!(bob.variation, dec!(0));
    }

    #[test]
    fn test_missing_profiles_only_lose_emails() {
        let store = MockRecordStore {
            profiles: None,
            ..fixture_store()
        };

        let envelope = service(store).get_clients_evolution().unwrap();

        assert!(envelope.data.iter().all(|c| c.email.is_empty()));
        assert_eq!(envelope.data[1].banker, "");
    }

    // --- Bankers ---

    #[test]
    fn test_bankers_evolution_uses_profile_fallback() {
        let envelope = service(fixture_store()).get_bankers_evolution().unwrap();

        let names: Vec<&str> = envelope.data.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Carla", "Alan Souza"]);

        let bruno = &envelope.data[0];
        assert_eq!(bruno.client_count, 2);
        assert_eq!(bruno.initial_value, dec!(90));
        assert_eq!(bruno.final_value, dec!(160));
        assert_eq!(bruno.variation, dec!(70));
    }

    #[test]
    fn test_bankers_capital_sorted_by_name() {
        let envelope = service(fixture_store()).get_bankers_capital().unwrap();

        let names: Vec<&str> = envelope.data.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Alan Souza", "Bruno", "Carla"]);

        let bruno = &envelope.data[1];
        assert_eq!(bruno.total, dec!(60));
        assert_eq!(bruno.initial_value, dec!(0));
        assert_eq!(bruno.final_value, dec!(60));
        let values: Vec<Decimal> = bruno.evolution.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(0), dec!(0), dec!(20), dec!(60)]);

        assert_eq!(envelope.data[0].total, dec!(400));
        assert_eq!(envelope.data[2].total, dec!(10));
    }

    #[test]
    fn test_top_bankers() {
        let settings = MetricsSettings {
            top_n: 2,
            ..Default::default()
        };
        let service = MetricsService::new(Arc::new(fixture_store()), settings);

        let envelope = service.get_top_bankers().unwrap();

        assert_eq!(envelope.count, 2);
        assert_eq!(envelope.data[0].name, "Alan Souza");
        assert_eq!(envelope.data[0].capital_raised, dec!(400));
        assert_eq!(envelope.data[1].name, "Bruno");
    }

    #[test]
    fn test_capital_requires_inflow_log() {
        let store = MockRecordStore {
            inflows: None,
            ..fixture_store()
        };
        let service = service(store);

        assert!(matches!(service.get_bankers_capital(), Err(Error::NoData)));
        assert!(matches!(service.get_capital_evolution(), Err(Error::NoData)));
        assert!(matches!(service.get_top_bankers(), Err(Error::NoData)));
    }

    // --- Firm-wide capital ---

    #[test]
    fn test_capital_evolution() {
        let envelope = service(fixture_store()).get_capital_evolution().unwrap();

        assert_eq!(envelope.data.total, dec!(470));
        let values: Vec<Decimal> = envelope.data.evolution.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(0), dec!(0), dec!(320), dec!(470)]);
        assert_eq!(envelope.start_date.as_deref(), Some("2025-11-30"));
        assert_eq!(envelope.count, 4);
    }

    #[test]
    fn test_capital_evolution_without_contributions_is_flat() {
        let store = MockRecordStore {
            clients: Some(vec![record(json!({"Cliente": "A", "2025-12-01": 10, "2025-12-02": 12}))]),
            inflows: Some(vec![]),
            profiles: Some(vec![]),
        };

        let envelope = service(store).get_capital_evolution().unwrap();

        assert_eq!(envelope.data.total, dec!(0));
        assert_eq!(envelope.data.evolution.len(), 2);
        assert!(envelope.data.evolution.iter().all(|p| p.value.is_zero()));
    }

    #[test]
    fn test_capital_evolution_rounds_after_accumulating() {
        let store = MockRecordStore {
            clients: Some(vec![
                record(json!({"Cliente": "A", "2025-12-01": 10, "2025-12-02": 10})),
                record(json!({"Cliente": "B", "2025-12-02": "0.005"})),
                record(json!({"Cliente": "C", "2025-12-02": "0.005"})),
            ]),
            inflows: Some(vec![]),
            profiles: Some(vec![]),
        };

        let envelope = service(store).get_capital_evolution().unwrap();

        assert_eq!(envelope.data.total, dec!(0.01));
        let values: Vec<Decimal> = envelope.data.evolution.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(0), dec!(0.01)]);
    }

    // --- Dashboard summary ---

    #[test]
    fn test_dashboard_summary_excludes_configured_bankers() {
        let settings = MetricsSettings {
            excluded_bankers: vec!["alan".to_string()],
            ..Default::default()
        };
        let service = MetricsService::new(Arc::new(fixture_store()), settings);

        let summary = service.get_dashboard_summary().unwrap().data;

        assert_eq!(summary.total_clients, 3);
        assert_eq!(summary.new_clients, 2);
        assert_eq!(summary.pl_total, dec!(470));
        assert_eq!(summary.pl_variation_pct, dec!(422.22));
        assert_eq!(summary.capital_raised, dec!(70));
        let top: Vec<&str> = summary.top_bankers.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(top, vec!["Bruno", "Carla"]);
        assert_eq!(summary.period_start, "2025-11-30");
        assert_eq!(summary.period_end, "2025-12-03");
    }

    #[test]
    fn test_dashboard_summary_without_exclusions() {
        let summary = service(fixture_store())
            .get_dashboard_summary()
            .unwrap()
            .data;

        assert_eq!(summary.capital_raised, dec!(470));
        assert_eq!(summary.top_bankers.len(), 3);
        assert_eq!(summary.top_bankers[0].name, "Alan Souza");
    }

    #[test]
    fn test_dashboard_summary_tolerates_missing_inflows() {
        let store = MockRecordStore {
            inflows: None,
            ..fixture_store()
        };

        let summary = service(store).get_dashboard_summary().unwrap().data;

        assert_eq!(summary.capital_raised, dec!(0));
        assert!(summary.top_bankers.is_empty());
        assert_eq!(summary.pl_total, dec!(470));
    }

    #[test]
    fn test_zero_first_total_gives_zero_variation() {
        let store = MockRecordStore {
            clients: Some(vec![
                record(json!({"Cliente": "A", "2025-12-01": 0, "2025-12-02": 100})),
            ]),
            inflows: Some(vec![]),
            profiles: Some(vec![]),
        };

        let summary = service(store).get_dashboard_summary().unwrap().data;

        assert_eq!(summary.pl_variation_pct, dec!(0));
        assert_eq!(summary.new_clients, 0);
    }

    #[test]
    fn test_out_of_range_variation_falls_back_to_zero() {
        let store = MockRecordStore {
            clients: Some(vec![record(json!({
                "Cliente": "A",
                "2025-12-01": "0.0000000000000000000001",
                "2025-12-02": 10000000000u64
            }))]),
            inflows: Some(vec![]),
            profiles: Some(vec![]),
        };

        let summary = service(store).get_dashboard_summary().unwrap().data;

        assert_eq!(summary.pl_variation_pct, dec!(0));
        assert_eq!(summary.pl_total, dec!(10000000000));
    }

    // --- Empty states ---

    #[test]
    fn test_unreadable_store_is_no_data() {
        let service = service(MockRecordStore::default());

        assert!(matches!(service.get_total_series(), Err(Error::NoData)));
        assert!(matches!(service.get_dashboard_summary(), Err(Error::NoData)));
    }

    #[test]
    fn test_empty_store_is_no_data() {
        let store = MockRecordStore {
            clients: Some(vec![]),
            ..Default::default()
        };

        assert!(matches!(
            service(store).get_clients_latest(),
            Err(Error::NoData)
        ));
    }

    #[test]
    fn test_records_without_dates_are_no_dates() {
        let store = MockRecordStore {
            clients: Some(vec![record(json!({"Cliente": "A", "CPF": "1"}))]),
            ..Default::default()
        };
        let service = service(store);

        assert!(matches!(service.get_total_series(), Err(Error::NoDates)));
        assert!(matches!(service.get_bankers_evolution(), Err(Error::NoDates)));
        assert!(matches!(service.get_dashboard_summary(), Err(Error::NoDates)));
    }

    #[test]
    fn test_excluded_banker_matching() {
        let settings = MetricsSettings {
            excluded_bankers: vec!["ALAN".to_string(), String::new()],
            ..Default::default()
        };

        assert!(settings.is_excluded_banker("Alan Souza"));
        assert!(settings.is_excluded_banker("joão alan"));
        assert!(!settings.is_excluded_banker("Bruno"));
    }
}
