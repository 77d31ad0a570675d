//! Small per-mission sample CSV files users can save and upload to try the
//! classifier.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mission::Mission;

#[derive(Debug, Error)]
pub enum SampleDataError {
    #[error("Failed to write sample data to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

const KEPLER_SAMPLE: &str = "kepoi_name,kepler_name,koi_period,koi_impact,koi_duration,koi_depth,koi_prad,koi_teq,koi_insol,koi_dor,koi_count,koi_num_transits,koi_max_sngle_ev,koi_max_mult_ev,koi_model_snr,koi_tce_plnt_num,koi_steff,koi_srad
K00001.01,Kepler-1b,4.887,0.5,2.5,0.001,1.2,1200,2000,12.5,1,100,5,3,15.2,1,6000,1.0
K00002.01,Kepler-2b,2.5,0.3,3.1,0.002,1.5,1100,1800,10.8,1,80,4,2,12.8,1,5800,0.95";

const TESS_SAMPLE: &str = "pl_name,pl_orbper,pl_trandur,pl_rade,pl_insol,pl_eqt,st_teff,st_logg,st_rad,st_tmag,sy_dist,pl_tranflag
TOI-123b,6.3,3.2,2.1,800,950,4500,4.5,0.7,10.2,50,1
TOI-456c,12.8,4.1,1.8,600,850,4200,4.6,0.65,11.5,60,1";

const K2_SAMPLE: &str = "pl_name,pl_orbper,pl_orbsmax,pl_rade,pl_bmasse,pl_orbeccen,pl_insol,pl_eqt,pl_tranflag,pl_rvflag,pl_astflag,pl_cbflag,pl_angsep,pl_orbtper,st_refname,st_spectype,st_teff,st_rad,st_mass,st_met,st_metratio,st_logg,st_age,st_dens,st_lum,st_uj,st_vj,st_bj,st_rc,st_ic,sy_kepmag,sy_kmag
K2-3b,10.1,0.08,2.2,8.5,0.05,900,920,1,0,0,0,0.02,2450000,\"K2-3\",\"K2V\",4200,0.7,0.8,-0.1,0.0,4.6,5.0,1.2,0.3,10.5,11.2,12.1,10.8,11.5,12.3,11.8
K2-18b,33.0,0.15,2.7,8.9,0.03,1100,950,1,0,0,0,0.03,2450000,\"K2-18\",\"M2V\",3500,0.4,0.4,0.1,0.0,4.8,2.0,3.5,0.1,12.8,13.5,14.2,13.0,13.7,14.5,14.0";

/// Suggested file name for a mission's sample.
pub fn sample_file_name(mission: Mission) -> &'static str {
    match mission {
        Mission::Kepler => "kepler_sample_data.csv",
        Mission::Tess => "tess_sample_data.csv",
        Mission::K2 => "k2_sample_data.csv",
    }
}

pub fn sample_csv(mission: Mission) -> &'static str {
    match mission {
        Mission::Kepler => KEPLER_SAMPLE,
        Mission::Tess => TESS_SAMPLE,
        Mission::K2 => K2_SAMPLE,
    }
}

/// Write the mission's sample CSV to `path`.
pub fn write_sample(mission: Mission, path: &Path) -> Result<(), SampleDataError> {
    std::fs::write(path, sample_csv(mission)).map_err(|source| SampleDataError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {mission} sample data to {}", path.display());
    Ok(())
}
