use serde::{Deserialize, Serialize};

/// One installment agreement as returned by the remote API. The list is a
/// disposable snapshot: it is replaced wholesale on every fetch and never
/// merged incrementally.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRecord {
    #[serde(rename = "personID")]
    pub person_id: String,
    pub client_name: String,
    pub phone_number: String,
    pub address: String,
    pub advice_name: String,
    pub installment_count: String,
    pub total_amount: f64,
    #[serde(rename = "installmentID")]
    pub installment_id: i64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    #[serde(default)]
    pub trust_receipt: Option<String>,
    pub installment_date: String,
}

impl InstallmentRecord {
    /// Per-installment value. The count arrives as free text, so an
    /// unparseable or zero count yields no value instead of a division fault.
    pub fn installment_value(&self) -> Option<f64> {
        let count: u32 = self.installment_count.trim().parse().ok()?;
        if count == 0 {
            return None;
        }
        Some(self.total_amount / count as f64)
    }

    /// Repayment progress in percent, clamped to 0..=100 so an overpaid
    /// record cannot overflow the progress bar.
    pub fn progress_percent(&self) -> f64 {
        if self.total_amount <= 0.0 {
            return 0.0;
        }
        (self.paid_amount / self.total_amount * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_settled(&self) -> bool {
        self.remaining_amount <= 0.0
    }

    pub fn receipt_image(&self) -> Option<&str> {
        self.trust_receipt.as_deref().filter(|url| !url.is_empty())
    }
}

/// Aggregates shown in the dashboard cards, recomputed as a pure fold over
/// the current snapshot whenever it changes. Never persisted.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DashboardStats {
    pub total_customers: usize,
    pub active_customers: usize,
    pub total_collected: f64,
    pub remaining_amount: f64,
}

impl DashboardStats {
    pub fn from_records(records: &[InstallmentRecord]) -> Self {
        Self {
            total_customers: records.len(),
            active_customers: records.iter().filter(|r| r.remaining_amount > 0.0).count(),
            total_collected: records.iter().map(|r| r.paid_amount).sum(),
            remaining_amount: records.iter().map(|r| r.remaining_amount).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(paid: f64, remaining: f64) -> InstallmentRecord {
        InstallmentRecord {
            person_id: "7".to_string(),
            client_name: "Client".to_string(),
            phone_number: "01000000000".to_string(),
            address: "Somewhere".to_string(),
            advice_name: "Fridge".to_string(),
            installment_count: "10".to_string(),
            total_amount: paid + remaining,
            installment_id: 1,
            paid_amount: paid,
            remaining_amount: remaining,
            trust_receipt: None,
            installment_date: "2025-01-01".to_string(),
        }
    }

    #[test]
    fn stats_fold_sums_and_counts() {
        let records = vec![record(500.0, 500.0), record(1200.0, 0.0), record(0.0, 300.0)];
        let stats = DashboardStats::from_records(&records);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.active_customers, 2);
        assert_eq!(stats.total_collected, 1700.0);
        assert_eq!(stats.remaining_amount, 800.0);
    }

    #[test]
    fn stats_fold_of_empty_list_is_all_zero() {
        let stats = DashboardStats::from_records(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn installment_value_divides_by_parsed_count() {
        let mut r = record(0.0, 1000.0);
        r.installment_count = "4".to_string();
        assert_eq!(r.installment_value(), Some(250.0));
    }

    #[test]
    fn installment_value_guards_zero_and_garbage_counts() {
        let mut r = record(0.0, 1000.0);
        r.installment_count = "0".to_string();
        assert_eq!(r.installment_value(), None);
        r.installment_count = "abc".to_string();
        assert_eq!(r.installment_value(), None);
        r.installment_count = "".to_string();
        assert_eq!(r.installment_value(), None);
    }

    #[test]
    fn progress_is_clamped_to_one_hundred() {
        let mut r = record(1200.0, 0.0);
        r.total_amount = 1000.0;
        assert_eq!(r.progress_percent(), 100.0);
    }

    #[test]
    fn progress_of_zero_total_is_zero() {
        let mut r = record(0.0, 0.0);
        r.total_amount = 0.0;
        assert_eq!(r.progress_percent(), 0.0);
    }

    #[test]
    fn settled_record_has_no_remaining_amount() {
        assert!(record(1000.0, 0.0).is_settled());
        assert!(!record(400.0, 600.0).is_settled());
    }

    #[test]
    fn decodes_wire_field_names() {
        let json = serde_json::json!({
            "personID": "42",
            "clientName": "Mona",
            "phoneNumber": "01234567890",
            "address": "12 Market St",
            "adviceName": "Washer",
            "installmentCount": "12",
            "totalAmount": 24000.0,
            "installmentID": 9,
            "paidAmount": 6000.0,
            "remainingAmount": 18000.0,
            "trustReceipt": "https://example.com/receipt.jpg",
            "installmentDate": "2025-03-10"
        });
        let record: InstallmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.person_id, "42");
        assert_eq!(record.installment_id, 9);
        assert_eq!(record.receipt_image(), Some("https://example.com/receipt.jpg"));
        assert_eq!(record.installment_value(), Some(2000.0));
    }

    #[test]
    fn missing_receipt_decodes_as_none() {
        let json = serde_json::json!({
            "personID": "42",
            "clientName": "Mona",
            "phoneNumber": "01234567890",
            "address": "12 Market St",
            "adviceName": "Washer",
            "installmentCount": "12",
            "totalAmount": 24000.0,
            "installmentID": 9,
            "paidAmount": 6000.0,
            "remainingAmount": 18000.0,
            "installmentDate": "2025-03-10"
        });
        let record: InstallmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.receipt_image(), None);
    }
}
