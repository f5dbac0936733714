use std::error::Error;

use colored::*;
use csv::Writer;

use pigroute::domain::types::{Farm, GeoPoint, PlanRequest, PlanResult, Slaughterhouse};
use pigroute::planner::Planner;

/// Runs the three-farm Madrid scenario against the planner and prints the
/// day-by-day plan plus the horizon summary, then exports the days to CSV.
fn main() -> Result<(), Box<dyn Error>> {
    let request = madrid_request();
    let result = Planner::default().plan(&request)?;

    print_plan(&result, &request);
    save_to_csv(&result, "plan_days.csv")?;
    println!("day records written to plan_days.csv");

    Ok(())
}

fn madrid_request() -> PlanRequest {
    let farm = |id: &str, name: &str, lat: f64, lng: f64, pigs: u64, cap: u64| Farm {
        id: id.into(),
        name: name.into(),
        location: GeoPoint { lat, lng },
        available_pigs: pigs,
        max_capacity: cap,
        initial_weight_kg: None,
    };

    PlanRequest {
        farms: vec![
            farm("farm-1", "Granja Los Robles", 40.4168, -3.7038, 150, 500),
            farm("farm-2", "Granja El Encinar", 40.4250, -3.6900, 200, 600),
            farm("farm-3", "Granja Vista Hermosa", 40.4100, -3.7200, 100, 400),
        ],
        slaughterhouse: Slaughterhouse {
            id: "slaughter-001".into(),
            name: "Matadero Central Madrid".into(),
            location: GeoPoint {
                lat: 40.4200,
                lng: -3.7000,
            },
            daily_capacity: 500,
            max_capacity: 1000,
        },
        truck_capacity: 250,
        num_days: 5,
        planning_days_per_week: 5,
        avg_pig_weight_kg: 110.0,
        price_per_kg: 2.2,
        truck_cost_per_week: 2000.0,
        fuel_cost_per_km: 0.35,
        cost_per_km: None,
        weekly_weight_gain_kg: 0.0,
        weekly_decline_rate: 0.15,
    }
}

fn print_plan(result: &PlanResult, request: &PlanRequest) {
    println!("plan {}", result.id);

    for (t, day) in result.days.iter().enumerate() {
        println!(
            "day {} ({}): {} trucks, {} pigs, {:.2} km",
            t + 1,
            day.date,
            day.trucks.len(),
            day.total_pigs(),
            day.total_distance_km
        );

        for truck in &day.trucks {
            println!(
                "  truck {}: {} pigs, {} stops, {:.2} km",
                truck.id,
                truck.total_pigs(),
                truck.stops.len(),
                truck.distance_km
            );
            for stop in &truck.stops {
                let name = request
                    .farms
                    .iter()
                    .find(|f| f.id == stop.farm_id)
                    .map(|f| f.name.as_str())
                    .unwrap_or("unknown");
                println!("    -> {}: {} pigs", name, stop.pigs);
            }
        }

        if day.net_profit_eur >= 0.0 {
            println!(
                "  {}",
                format!("net profit: {:.2} EUR", day.net_profit_eur).green()
            );
        } else {
            println!(
                "  {}",
                format!("net loss: {:.2} EUR", day.net_profit_eur).red()
            );
        }
    }

    let s = &result.summary;
    println!("== {} day summary ==", s.total_days);
    println!("revenue:    {:>12.2} EUR", s.total_revenue_euros);
    println!("trip cost:  {:>12.2} EUR", s.total_fuel_cost_euros);
    println!("truck cost: {:>12.2} EUR", s.total_truck_cost_euros);
    println!(
        "net profit: {} ({:.2}% margin)",
        format!("{:>12.2} EUR", s.total_net_profit_euros).green(),
        s.profit_margin_percent
    );
    println!(
        "{} pigs over {:.2} km, max {} trucks/day, {:.2} EUR/pig",
        s.total_pigs_collected, s.total_distance_km, s.max_trucks_per_day, s.cost_per_pig_euros
    );
}

fn save_to_csv(result: &PlanResult, filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record([
        "date",
        "pigs",
        "trucks",
        "distance_km",
        "revenue_eur",
        "trip_cost_eur",
        "truck_cost_eur",
        "net_profit_eur",
    ])?;

    for day in &result.days {
        wtr.write_record([
            day.date.clone(),
            day.total_pigs().to_string(),
            day.trucks.len().to_string(),
            day.total_distance_km.to_string(),
            day.revenue_eur.to_string(),
            day.trip_cost_eur.to_string(),
            day.truck_cost_eur.to_string(),
            day.net_profit_eur.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
