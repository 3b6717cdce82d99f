//! `quote` handler: drives the quote form against the configured backend.

use ctaz_core::{AppConfig, Discount, DiscountInfo, GeoPoint};
use ctaz_quote::{FormState, HttpQuoteClient, QuoteForm, TripDetails, VehicleInfo};

use crate::locate::FixedPosition;
use crate::QuoteArgs;

fn trip_from_args(args: &QuoteArgs) -> TripDetails {
    let mut discounts = DiscountInfo::default();
    discounts.toggle(Discount::Veteran, args.veteran);
    discounts.toggle(Discount::Student, args.student);

    TripDetails {
        service: args.service.clone(),
        from_address: args.from_address.clone(),
        to_address: args.to_address.clone(),
        miles: args.miles.clone(),
        vehicle: VehicleInfo {
            year: args.year.clone(),
            make: args.make.clone(),
            model: args.model.clone(),
            plate: args.plate.clone(),
            registration_state: args.registration_state.clone(),
            is_large: args.large,
        },
        discounts,
        estimated_total: discounts.apply(args.subtotal),
    }
}

fn shared_point(args: &QuoteArgs) -> Option<GeoPoint> {
    match (args.share_longitude, args.share_latitude) {
        (Some(longitude), Some(latitude)) => Some(GeoPoint::new(longitude, latitude)),
        _ => None,
    }
}

pub(crate) async fn run_quote(config: &AppConfig, args: QuoteArgs) -> anyhow::Result<()> {
    let client = HttpQuoteClient::new(
        &config.quote_base_url,
        config.http_timeout_secs,
        &config.user_agent,
    )?;
    let trip = trip_from_args(&args);
    let shared = shared_point(&args);

    let mut form = QuoteForm::new();
    form.customer_name = args.name;
    form.customer_phone = args.phone;
    form.customer_email = args.email;
    form.message = args.message;

    if let Some(point) = shared {
        if form.share_location(&FixedPosition(point)).await.is_none() {
            if let Some(message) = form.location_error() {
                tracing::warn!(%message, "could not attach location");
            }
        }
    }

    tracing::info!(endpoint = %client.endpoint(), "submitting quote request");
    let state = form.submit(&trip, &client).await.clone();
    match state {
        FormState::Success => {
            println!("Quote request submitted. We'll be in touch shortly.");
            Ok(())
        }
        state => {
            let message = form.error().unwrap_or("quote request was not submitted");
            anyhow::bail!("{message} (state: {state})")
        }
    }
}
