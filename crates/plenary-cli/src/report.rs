//! Frontend JSON: `{period: {party: {numPartido, tamanhoPartido, x, y}}}`.

use indexmap::IndexMap;
use plenary::TemporalAnalysis;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyFrame {
    #[serde(rename = "numPartido")]
    pub number: Option<u32>,
    #[serde(rename = "tamanhoPartido")]
    pub size: u32,
    pub x: f64,
    pub y: f64,
}

pub type Frames = IndexMap<String, IndexMap<String, PartyFrame>>;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn frames(analysis: &TemporalAnalysis) -> Frames {
    let mut out: Frames = IndexMap::with_capacity(analysis.periods.len());
    for layout in &analysis.periods {
        let mut parties: IndexMap<String, PartyFrame> = IndexMap::with_capacity(layout.len());
        for (party, (pos, &size)) in analysis
            .parties
            .iter()
            .zip(layout.positions.iter().zip(&layout.sizes))
        {
            parties.insert(
                party.name.clone(),
                PartyFrame {
                    number: party.number,
                    size: analysis.bubble_size(size),
                    x: round2(pos.x),
                    y: round2(pos.y),
                },
            );
        }
        out.insert(layout.label.clone(), parties);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use plenary::{Party, PeriodLayout, Point};

    #[test]
    fn frames_round_coordinates_and_scale_sizes() {
        let analysis = TemporalAnalysis {
            parties: vec![Party::new("PT").with_number(13), Party::new("PV")],
            periods: vec![PeriodLayout::new(
                "2011S1",
                vec![Point::new(12.3456, 99.999), Point::new(50.0, 50.0)],
                vec![3, 0],
            )],
            scale: 2.5,
        };
        let f = frames(&analysis);
        let pt = &f["2011S1"]["PT"];
        assert_eq!(pt.number, Some(13));
        assert_eq!(pt.size, 7);
        assert_eq!(pt.x, 12.35);
        assert_eq!(pt.y, 100.0);

        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(
            json["2011S1"]["PV"],
            serde_json::json!({"numPartido": null, "tamanhoPartido": 0, "x": 50.0, "y": 50.0})
        );
    }
}
