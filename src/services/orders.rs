// Orders service — amount/tax math, payment-milestone balance check, and
// the required-document checklist.

use crate::types::{
    DocRequirement, Order, PaymentMilestone, MILESTONE_PAID, MILESTONE_PENDING,
};

/// Document types an order can require.
pub const REQUIRED_DOCS: &[&str] = &[
    "CoA",
    "MSDS",
    "Health Certificate",
    "Organic",
    "FSSAI",
    "FDA",
    "GMP",
    "Halal",
    "Kosher",
];

/// Tolerance for the advisory milestone-percent check.
const PERCENT_EPSILON: f64 = 0.1;

/// Total and tax for a quantity at a rate with a percent tax.
pub fn amounts(qty: f64, rate: f64, tax_rate: f64) -> (f64, f64) {
    let base = qty * rate;
    let tax = (base * tax_rate) / 100.0;
    (base + tax, tax)
}

/// Recompute an order's stored `amount`/`tax_amount` from its inputs.
pub fn recalculate(order: &mut Order) {
    let (amount, tax_amount) = amounts(order.qty, order.rate, order.tax_rate);
    order.amount = amount;
    order.tax_amount = tax_amount;
}

pub fn milestone_total_percent(terms: &[PaymentMilestone]) -> f64 {
    terms.iter().map(|t| t.percent).sum()
}

/// Whether milestone percentages add up to 100. Advisory only — shown next
/// to the milestone editor, never blocks a save; drafts are routinely kept
/// incomplete.
pub fn milestones_balanced(terms: &[PaymentMilestone]) -> bool {
    (milestone_total_percent(terms) - 100.0).abs() < PERCENT_EPSILON
}

/// The money a single milestone represents.
pub fn milestone_amount(order: &Order, milestone: &PaymentMilestone) -> f64 {
    (order.amount * milestone.percent) / 100.0
}

/// Flip one milestone between Paid and Pending.
pub fn toggle_milestone_status(order: &mut Order, index: usize) {
    if let Some(milestone) = order.payment_terms.get_mut(index) {
        milestone.status = if milestone.is_paid() {
            MILESTONE_PENDING.to_string()
        } else {
            MILESTONE_PAID.to_string()
        };
    }
}

/// Toggle a named document requirement: absent → required, present →
/// dropped entirely (the checklist stores only required entries).
pub fn toggle_doc_requirement(order: &mut Order, doc_name: &str) {
    if order.doc_requirements.remove(doc_name).is_none() {
        order.doc_requirements.insert(
            doc_name.to_string(),
            DocRequirement {
                required: true,
                received: false,
                link: String::new(),
            },
        );
    }
}

/// (received, required) counts for the checklist progress line.
pub fn document_progress(order: &Order) -> (usize, usize) {
    let required = order.doc_requirements.len();
    let received = order
        .doc_requirements
        .values()
        .filter(|d| d.received)
        .count();
    (received, required)
}

/// Σ amount across a company's orders.
pub fn orders_total(orders: &[Order]) -> f64 {
    orders.iter().map(|o| o.amount).sum()
}

pub fn orders_for_company<'a>(orders: &'a [Order], company_id: &str) -> Vec<&'a Order> {
    orders.iter().filter(|o| o.company_id == company_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(label: &str, percent: f64, status: &str) -> PaymentMilestone {
        PaymentMilestone {
            label: label.to_string(),
            percent,
            status: status.to_string(),
        }
    }

    #[test]
    fn amount_includes_tax() {
        let (amount, tax) = amounts(100.0, 50.0, 18.0);
        assert_eq!(tax, 900.0);
        assert_eq!(amount, 5900.0);
    }

    #[test]
    fn recalculate_writes_both_fields() {
        let mut order = Order {
            qty: 10.0,
            rate: 20.0,
            tax_rate: 5.0,
            ..Order::default()
        };
        recalculate(&mut order);
        assert_eq!(order.amount, 210.0);
        assert_eq!(order.tax_amount, 10.0);
    }

    #[test]
    fn milestone_balance_is_advisory_with_tolerance() {
        let balanced = vec![
            milestone("Advance", 30.0, MILESTONE_PENDING),
            milestone("On Dispatch", 70.05, MILESTONE_PENDING),
        ];
        assert!(milestones_balanced(&balanced));

        let unbalanced = vec![milestone("Advance", 30.0, MILESTONE_PENDING)];
        assert!(!milestones_balanced(&unbalanced));
        assert_eq!(milestone_total_percent(&unbalanced), 30.0);
    }

    #[test]
    fn milestone_toggle_flips_status() {
        let mut order = Order {
            payment_terms: vec![milestone("Advance", 50.0, MILESTONE_PENDING)],
            ..Order::default()
        };
        toggle_milestone_status(&mut order, 0);
        assert!(order.payment_terms[0].is_paid());
        toggle_milestone_status(&mut order, 0);
        assert!(!order.payment_terms[0].is_paid());
        // Out-of-range index is a no-op.
        toggle_milestone_status(&mut order, 7);
    }

    #[test]
    fn doc_requirement_toggles_on_and_off() {
        let mut order = Order::default();
        toggle_doc_requirement(&mut order, "CoA");
        assert!(order.doc_requirements["CoA"].required);
        assert!(!order.doc_requirements["CoA"].received);

        toggle_doc_requirement(&mut order, "CoA");
        assert!(order.doc_requirements.is_empty());
    }

    #[test]
    fn document_progress_counts_received() {
        let mut order = Order::default();
        toggle_doc_requirement(&mut order, "CoA");
        toggle_doc_requirement(&mut order, "MSDS");
        order.doc_requirements.get_mut("CoA").unwrap().received = true;
        assert_eq!(document_progress(&order), (1, 2));
    }

    #[test]
    fn totals_sum_company_orders() {
        let orders = vec![
            Order {
                company_id: "c1".to_string(),
                amount: 5900.0,
                ..Order::default()
            },
            Order {
                company_id: "c2".to_string(),
                amount: 100.0,
                ..Order::default()
            },
            Order {
                company_id: "c1".to_string(),
                amount: 100.0,
                ..Order::default()
            },
        ];
        let mine = orders_for_company(&orders, "c1");
        assert_eq!(mine.len(), 2);
        let mine: Vec<Order> = mine.into_iter().cloned().collect();
        assert_eq!(orders_total(&mine), 6000.0);
    }
}
