//! Signal-quality conversions.
//!
//! Pure functions mapping the modem-native +CSQ encodings to physical units
//! and physical units to a discrete bar scale. The tables are bit-exact
//! against the telecom encoding they implement (3GPP TS 27.007 +CSQ).

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Rat, SignalInfo, INVALID_SIGNAL_BAR_VALUE, INVALID_SIGNAL_VALUE};

const CSQ_UNKNOWN: i16 = 99;
const CSQ_RSSI_MIN: i16 = 0;
const CSQ_RSSI_MAX: i16 = 31;
const CSQ_BER_MIN: i16 = 0;
const CSQ_BER_MAX: i16 = 7;
const CSQ_RSSI_BASE: i16 = -113;
const CSQ_RSSI_STEP: i16 = 2;

/// BER in units of 0.01%, indexed by the +CSQ `<ber>` code (GSM 05.08 RXQUAL
/// midpoints: 0.14% .. 18.10%).
const RXQUAL_TO_BER_CENTIPERCENT: [i16; 8] = [14, 28, 57, 113, 226, 453, 905, 1810];

/// Signal-bar thresholds, scanned in ascending upper-bound order; the first
/// entry whose bound is >= the measured value wins, the last bound acting as
/// +infinity for in-range values.
type SignalBarsTable = [(i16, u8); 5];

/// RSSI thresholds in dBm for GSM/EDGE.
const GSM_SIGNAL_BARS: SignalBarsTable = [(-104, 1), (-98, 2), (-89, 3), (-80, 4), (0, 5)];

/// RSRP thresholds in dBm for LTE / CAT-M1.
const LTE_CATM_SIGNAL_BARS: SignalBarsTable = [(-115, 1), (-105, 2), (-95, 3), (-85, 4), (0, 5)];

/// RSRP thresholds in dBm for NB-IoT.
const LTE_NBIOT_SIGNAL_BARS: SignalBarsTable = [(-115, 1), (-105, 2), (-95, 3), (-85, 4), (0, 5)];

/// Converts a +CSQ `<rssi>` code to dBm.
///
/// Code 99 reports "unknown" and maps to [`INVALID_SIGNAL_VALUE`]; any other
/// out-of-range code is an error, never a clamped value.
pub fn csq_rssi_dbm(code: i16) -> Result<i16> {
    if code == CSQ_UNKNOWN {
        return Ok(INVALID_SIGNAL_VALUE);
    }
    if !(CSQ_RSSI_MIN..=CSQ_RSSI_MAX).contains(&code) {
        return Err(Error::BadParameter);
    }
    Ok(CSQ_RSSI_BASE + code * CSQ_RSSI_STEP)
}

/// Converts a +CSQ `<ber>` code to a bit error rate in units of 0.01%.
pub fn csq_ber_centipercent(code: i16) -> Result<i16> {
    if code == CSQ_UNKNOWN {
        return Ok(INVALID_SIGNAL_VALUE);
    }
    if !(CSQ_BER_MIN..=CSQ_BER_MAX).contains(&code) {
        return Err(Error::BadParameter);
    }
    Ok(RXQUAL_TO_BER_CENTIPERCENT[code as usize])
}

fn signal_bars(compare_value: i16, rat: Rat) -> u8 {
    let table: &SignalBarsTable = match rat {
        Rat::Gsm | Rat::Edge => &GSM_SIGNAL_BARS,
        Rat::Lte | Rat::CatM1 => &LTE_CATM_SIGNAL_BARS,
        Rat::NbIot => &LTE_NBIOT_SIGNAL_BARS,
        _ => return INVALID_SIGNAL_BAR_VALUE,
    };

    for &(upper_threshold, bars) in table {
        if compare_value <= upper_threshold {
            return bars;
        }
    }

    INVALID_SIGNAL_BAR_VALUE
}

/// Computes the 0..=5 bar level for the given radio technology and stores it
/// in `info.bars`.
///
/// GSM-family technologies are judged on RSSI, the LTE family on RSRP. An
/// unrecognized technology sets the invalid bar sentinel and reports
/// [`Error::Unknown`].
pub fn compute_signal_bars(rat: Rat, info: &mut SignalInfo) -> Result<()> {
    match rat {
        Rat::Gsm | Rat::Edge => {
            info.bars = signal_bars(info.rssi, rat);
            debug!("compute_signal_bars: RSSI {} bars {}", info.rssi, info.bars);
            Ok(())
        }
        Rat::Lte | Rat::CatM1 | Rat::NbIot => {
            info.bars = signal_bars(info.rsrp, rat);
            debug!("compute_signal_bars: RSRP {} bars {}", info.rsrp, info.bars);
            Ok(())
        }
        _ => {
            info.bars = INVALID_SIGNAL_BAR_VALUE;
            Err(Error::Unknown)
        }
    }
}
