//! Normalization pipeline: absolute prices to % change from period start.

use std::collections::BTreeMap;

use super::{round2, SeriesError};
use crate::domain::{HistoricalPoint, NormalizedPoint, PeerSeries};

/// Normalize `primary` and each peer against their own first value.
///
/// Peers are aligned to the primary by index, not by date. A peer that has
/// no entry at index `i` contributes `0` there. The output has exactly one
/// point per primary point, dated like the primary.
pub fn normalize(
    primary: &[HistoricalPoint],
    peers: &[PeerSeries],
) -> Result<Vec<NormalizedPoint>, SeriesError> {
    let start = primary.first().ok_or(SeriesError::EmptySeries)?.value;
    if start == 0.0 {
        return Err(SeriesError::ZeroBaseline {
            entity: "primary".to_string(),
        });
    }

    let mut peer_starts = Vec::with_capacity(peers.len());
    for peer in peers {
        let peer_start = peer.series.first().map(|p| p.value);
        if peer_start == Some(0.0) {
            return Err(SeriesError::ZeroBaseline {
                entity: peer.code.clone(),
            });
        }
        peer_starts.push(peer_start);
    }

    let points = primary
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let peers: BTreeMap<String, f64> = peers
                .iter()
                .zip(&peer_starts)
                .map(|(peer, peer_start)| {
                    let pct = match (peer.series.get(i), peer_start) {
                        (Some(p), Some(s)) => pct_change(p.value, *s),
                        _ => 0.0,
                    };
                    (peer.code.clone(), pct)
                })
                .collect();

            NormalizedPoint {
                date: point.date,
                pct_change: pct_change(point.value, start),
                peers,
            }
        })
        .collect();

    Ok(points)
}

fn pct_change(value: f64, start: f64) -> f64 {
    round2((value - start) / start * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<HistoricalPoint> {
        let d0 = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| HistoricalPoint::new(d0 + chrono::Duration::days(i as i64), v))
            .collect()
    }

    #[test]
    fn hundred_one_ten_ninety_nine() {
        let out = normalize(&series(&[100.0, 110.0, 99.0]), &[]).unwrap();
        let pct: Vec<f64> = out.iter().map(|p| p.pct_change).collect();
        assert_eq!(pct, vec![0.0, 10.0, -1.0]);
    }

    #[test]
    fn dates_follow_primary() {
        let primary = series(&[1.0, 2.0]);
        let out = normalize(&primary, &[]).unwrap();
        assert_eq!(out[1].date, primary[1].date);
    }

    #[test]
    fn peers_use_their_own_baseline() {
        let peers = vec![PeerSeries {
            code: "B".into(),
            series: series(&[50.0, 55.0, 45.0]),
        }];
        let out = normalize(&series(&[100.0, 100.0, 100.0]), &peers).unwrap();
        assert_eq!(out[0].peers["B"], 0.0);
        assert_eq!(out[1].peers["B"], 10.0);
        assert_eq!(out[2].peers["B"], -10.0);
    }

    #[test]
    fn short_peer_pads_with_zero() {
        let peers = vec![
            PeerSeries {
                code: "SHORT".into(),
                series: series(&[10.0, 12.0]),
            },
            PeerSeries {
                code: "EMPTY".into(),
                series: Vec::new(),
            },
        ];
        let out = normalize(&series(&[1.0, 1.1, 1.2, 1.3]), &peers).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[1].peers["SHORT"], 20.0);
        assert_eq!(out[2].peers["SHORT"], 0.0);
        assert_eq!(out[3].peers["SHORT"], 0.0);
        assert!(out.iter().all(|p| p.peers["EMPTY"] == 0.0));
    }

    #[test]
    fn empty_primary_rejected() {
        assert_eq!(normalize(&[], &[]), Err(SeriesError::EmptySeries));
    }

    #[test]
    fn zero_primary_baseline_rejected() {
        assert!(matches!(
            normalize(&series(&[0.0, 1.0]), &[]),
            Err(SeriesError::ZeroBaseline { .. })
        ));
    }

    #[test]
    fn zero_peer_baseline_names_peer() {
        let peers = vec![PeerSeries {
            code: "ZERO".into(),
            series: series(&[0.0, 1.0]),
        }];
        assert_eq!(
            normalize(&series(&[1.0, 1.0]), &peers),
            Err(SeriesError::ZeroBaseline {
                entity: "ZERO".into()
            })
        );
    }
}
