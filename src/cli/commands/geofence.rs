use crate::cli::parser::{Commands, GeofenceCmd};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{audit, geofences};
use crate::errors::AppResult;
use crate::geo::LatLng;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Geofence { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        GeofenceCmd::Add {
            name,
            lat,
            lng,
            radius_m,
        } => {
            let id = geofences::add_geofence(&pool.conn, name, LatLng::new(*lat, *lng), *radius_m)?;
            audit::audit(
                &pool.conn,
                "geofence_add",
                &id.to_string(),
                &format!("'{}' at ({}, {}) r={}m", name, lat, lng, radius_m),
            )?;
            success(format!("Geofence created: id {} ('{}')", id, name));
        }

        GeofenceCmd::List => {
            let all = geofences::list_geofences(&pool.conn)?;
            if all.is_empty() {
                println!("No geofences.");
            }
            for g in all {
                println!(
                    "{:>4}  {:<24} center ({}, {})  radius {} m",
                    g.id, g.name, g.center_lat, g.center_lng, g.radius_m
                );
            }
        }

        GeofenceCmd::Del { id } => {
            geofences::delete_geofence(&mut pool.conn, *id)?;
            audit::audit(
                &pool.conn,
                "geofence_del",
                &id.to_string(),
                "geofence and statuses deleted",
            )?;
            success(format!("Geofence {} deleted.", id));
        }
    }

    Ok(())
}
