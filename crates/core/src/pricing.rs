// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pricing rule evaluator.
//!
//! Selection is priority first, condition specificity second, and a tie
//! on both is a hard `AmbiguousRule` error: silent mispricing is worse
//! than a rejected quote, so evaluation fails closed instead of guessing.
//!
//! The arithmetic is fixed-point throughout. The linear formula is
//! clamped before the multiplier so a runaway per-hour or per-person term
//! stays sane, and the multiplied amount is clamped again when both
//! bounds are set so the final customer-facing number is capped too.

use crate::error::CoreError;
use tour_book_domain::{
    BookingConfig, BookingRequest, Money, PriceBreakdown, PriceModifier, PricingRule, RuleContext,
    RuleSnapshot,
};

/// Evaluates the pricing rules for a request.
///
/// For a fixed rule snapshot this is a pure function of the request:
/// identical requests always yield identical breakdowns.
///
/// # Arguments
///
/// * `request` - The booking request (its optional vehicle class
///   participates in condition matching)
/// * `rules` - A versioned rule snapshot
/// * `config` - The operational configuration (deposit share)
///
/// # Returns
///
/// The price breakdown for the winning rule.
///
/// # Errors
///
/// * `CoreError::NoMatchingRule` if no active rule matches
/// * `CoreError::AmbiguousRule` if the top two candidates tie on both
///   priority and specificity
/// * `CoreError::DomainViolation` if the winning rule's arithmetic
///   overflows the fixed-point range
pub fn evaluate_price(
    request: &BookingRequest,
    rules: &RuleSnapshot,
    config: &BookingConfig,
) -> Result<PriceBreakdown, CoreError> {
    let context = RuleContext::for_request(
        request.date,
        request.duration_minutes,
        request.vehicle_class,
        &rules.holidays,
    );

    let mut candidates: Vec<&PricingRule> = rules
        .pricing_rules
        .iter()
        .filter(|rule| {
            rule.active && rule.valid_on(request.date) && rule.conditions.matches(&context)
        })
        .collect();

    if candidates.is_empty() {
        return Err(CoreError::NoMatchingRule { date: request.date });
    }

    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.conditions.specificity().cmp(&a.conditions.specificity()))
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });

    if candidates.len() > 1 {
        let (first, second) = (candidates[0], candidates[1]);
        if first.priority == second.priority
            && first.conditions.specificity() == second.conditions.specificity()
        {
            return Err(CoreError::AmbiguousRule {
                rule_a: first.rule_id,
                rule_b: second.rule_id,
                priority: first.priority,
                specificity: first.conditions.specificity(),
            });
        }
    }

    let rule = candidates[0];
    compute_breakdown(rule, request, config).map_err(CoreError::DomainViolation)
}

/// Applies the winning rule's formula and assembles the breakdown.
fn compute_breakdown(
    rule: &PricingRule,
    request: &BookingRequest,
    config: &BookingConfig,
) -> Result<PriceBreakdown, tour_book_domain::DomainError> {
    let hourly = rule
        .per_hour
        .mul_div_round(i64::from(request.duration_minutes), 60)?;
    let per_person = rule.per_person.checked_mul(request.party_size)?;

    let linear = rule
        .base_price
        .checked_add(hourly)?
        .checked_add(per_person)?;
    let subtotal = linear.clamp_to(rule.min_price, rule.max_price);
    let multiplied = subtotal.apply_multiplier_bp(rule.multiplier_bp)?;
    // The second clamp applies only when both bounds are set
    let total = if rule.min_price.is_some() && rule.max_price.is_some() {
        multiplied.clamp_to(rule.min_price, rule.max_price)
    } else {
        multiplied
    };

    let mut modifiers: Vec<PriceModifier> = Vec::new();
    if hourly != Money::ZERO {
        modifiers.push(PriceModifier::new(String::from("hourly"), hourly));
    }
    if per_person != Money::ZERO {
        modifiers.push(PriceModifier::new(
            String::from("per passenger"),
            per_person,
        ));
    }
    if subtotal != linear {
        modifiers.push(PriceModifier::new(
            String::from("price bounds"),
            subtotal.checked_sub(linear)?,
        ));
    }
    if rule.multiplier_bp != 10_000 {
        modifiers.push(PriceModifier::new(
            String::from("multiplier"),
            multiplied.checked_sub(subtotal)?,
        ));
    }
    if total != multiplied {
        modifiers.push(PriceModifier::new(
            String::from("final cap"),
            total.checked_sub(multiplied)?,
        ));
    }

    PriceBreakdown::new(
        rule.base_price,
        modifiers,
        subtotal,
        total,
        config.deposit_basis_points(),
    )
}
