//! The layout run.
//!
//! [`layout`] validates the batch, then threads a fresh [`LayoutState`]
//! through the three stages:
//!
//! 1. column assignment ([`Columns::place`]),
//! 2. overlap registration ([`OverlapIndex::register`]), right after each placement,
//! 3. width reflow ([`reflow`](crate::reflow)).
//!
//! Nothing survives between calls, so two runs over equal input always
//! produce equal output.

use serde::Serialize;
use tracing::{debug, trace};

use crate::columns::Columns;
use crate::config::{EventOrder, LayoutConfig, ReflowStrategy};
use crate::error::Result;
use crate::event::{validate_events, EventInput, EventLayout};
use crate::overlap::OverlapIndex;
use crate::reflow::{apply_global_width, reflow_components, reflow_neighborhood};

// ── DayLayout ───────────────────────────────────────────────────────────────

/// The result of one layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    /// Number of columns opened, 0 for an empty day.
    pub column_count: usize,
    /// One entry per input event, ordered by id.
    pub events: Vec<EventLayout>,
}

impl DayLayout {
    pub fn get(&self, id: usize) -> Option<&EventLayout> {
        self.events.get(id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ── LayoutState ─────────────────────────────────────────────────────────────

/// Working state of a single layout run.
///
/// Created per call and consumed by [`LayoutState::finish`]; never shared.
#[derive(Debug)]
pub struct LayoutState {
    config: LayoutConfig,
    events: Vec<EventLayout>,
    columns: Columns,
    overlap: OverlapIndex,
    /// Ids in the order they were placed.
    placed: Vec<usize>,
}

impl LayoutState {
    /// Build state for a batch that has already been validated.
    pub fn new(inputs: &[EventInput], config: LayoutConfig) -> Self {
        let events = inputs
            .iter()
            .enumerate()
            .map(|(id, input)| EventLayout::new(id, input))
            .collect();
        Self {
            config,
            events,
            columns: Columns::new(),
            overlap: OverlapIndex::new(),
            placed: Vec::with_capacity(inputs.len()),
        }
    }

    /// Ids in processing order.
    fn processing_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.events.len()).collect();
        if self.config.order == EventOrder::StartTime {
            // Stable, so equal starts keep input order.
            order.sort_by(|&a, &b| self.events[a].start.total_cmp(&self.events[b].start));
        }
        order
    }

    /// Stages 1 and 2 for one event.
    fn place(&mut self, id: usize) {
        let column = self.columns.place(&mut self.events, id);
        self.placed.push(id);
        self.overlap.register(&self.events, &self.placed, id);
        trace!(
            event = id,
            column,
            overlaps = self.overlap.degree(id),
            "placed event"
        );
    }

    /// Place every event, then reflow widths.
    pub fn run(mut self) -> Self {
        for id in self.processing_order() {
            self.place(id);
        }
        if self.events.is_empty() {
            return self;
        }

        apply_global_width(&mut self.events, &self.columns, &self.config);
        match self.config.reflow {
            ReflowStrategy::Neighborhood => reflow_neighborhood(
                &mut self.events,
                &self.overlap,
                self.columns.highest_index(),
                &self.placed,
                &self.config,
            ),
            ReflowStrategy::Component => {
                reflow_components(&mut self.events, &self.overlap, &self.placed, &self.config)
            }
        }
        self
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn overlap(&self) -> &OverlapIndex {
        &self.overlap
    }

    pub fn finish(self) -> DayLayout {
        DayLayout {
            column_count: self.columns.len(),
            events: self.events,
        }
    }
}

// ── layout ──────────────────────────────────────────────────────────────────

/// Lay out one day's events.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidConfig`](crate::LayoutError::InvalidConfig)
/// if `config` fails validation, or
/// [`LayoutError::InvalidInterval`](crate::LayoutError::InvalidInterval) for
/// the first event with `end <= start`. Validation happens before any
/// placement.
///
/// # Examples
///
/// ```
/// use day_layout::{layout, EventInput, LayoutConfig};
///
/// let events = [
///     EventInput::new(0.0, 60.0),
///     EventInput::new(30.0, 90.0),
///     EventInput::new(600.0, 660.0),
/// ];
/// let day = layout(&events, &LayoutConfig::default()).unwrap();
/// assert_eq!(day.column_count, 2);
/// assert_eq!(day.events[1].margin_left, 300.0);
/// assert_eq!(day.events[2].width, 597.0);
/// ```
pub fn layout(events: &[EventInput], config: &LayoutConfig) -> Result<DayLayout> {
    config.validate()?;
    validate_events(events)?;

    let day = LayoutState::new(events, *config).run().finish();
    debug!(
        events = day.events.len(),
        columns = day.column_count,
        "laid out day"
    );
    Ok(day)
}

/// JSON in, JSON out: `events_json` is an array of `{"start", "end"}`.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidJson`](crate::LayoutError::InvalidJson) if
/// the events cannot be parsed, otherwise the errors of [`layout`].
pub fn layout_json(events_json: &str, config: &LayoutConfig) -> Result<String> {
    let events: Vec<EventInput> = serde_json::from_str(events_json)?;
    let day = layout(&events, config)?;
    Ok(serde_json::to_string(&day)?)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    fn inputs(ranges: &[(f64, f64)]) -> Vec<EventInput> {
        ranges.iter().copied().map(EventInput::from).collect()
    }

    fn geometry(day: &DayLayout) -> Vec<(f64, f64)> {
        day.events.iter().map(|e| (e.width, e.margin_left)).collect()
    }

    #[test]
    fn test_empty_input_is_empty_layout() {
        let day = layout(&[], &LayoutConfig::default()).unwrap();
        assert!(day.is_empty());
        assert_eq!(day.column_count, 0);
    }

    #[test]
    fn test_single_event_full_width() {
        let day = layout(&inputs(&[(100.0, 200.0)]), &LayoutConfig::default()).unwrap();
        assert_eq!(day.column_count, 1);
        assert_eq!(geometry(&day), vec![(597.0, 0.0)]);
    }

    #[test]
    fn test_pair_and_isolated_event() {
        let day = layout(
            &inputs(&[(0.0, 60.0), (30.0, 90.0), (600.0, 660.0)]),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(day.column_count, 2);
        assert_eq!(
            geometry(&day),
            vec![(297.0, 0.0), (297.0, 300.0), (597.0, 0.0)]
        );
        assert_eq!(
            day.events.iter().map(|e| e.column).collect::<Vec<_>>(),
            vec![0, 1, 0]
        );
    }

    #[test]
    fn test_afternoon_chain_with_morning_meeting() {
        let day = layout(
            &inputs(&[(30.0, 150.0), (540.0, 600.0), (560.0, 620.0), (610.0, 670.0)]),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(day.column_count, 2);
        assert_eq!(
            geometry(&day),
            vec![(597.0, 0.0), (297.0, 0.0), (297.0, 300.0), (297.0, 0.0)]
        );
        let e1 = day.get(1).unwrap();
        let e2 = day.get(2).unwrap();
        let e3 = day.get(3).unwrap();
        assert!(!e1.span().intersects(&e2.span()));
        assert!(!e2.span().intersects(&e3.span()));
    }

    #[test]
    fn test_touching_events_share_column() {
        let day = layout(
            &inputs(&[(100.0, 200.0), (200.0, 300.0)]),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(day.column_count, 1);
        assert_eq!(geometry(&day), vec![(597.0, 0.0), (597.0, 0.0)]);
    }

    #[test]
    fn test_top_and_height_pass_through() {
        let day = layout(&inputs(&[(540.0, 600.0)]), &LayoutConfig::default()).unwrap();
        let event = &day.events[0];
        assert_eq!(event.id, 0);
        assert_eq!(event.top, 540.0);
        assert_eq!(event.height, 60.0);
    }

    #[test]
    fn test_custom_width_and_gutter() {
        let config = LayoutConfig::default().with_total_width(800.0).with_gutter(4.0);
        let day = layout(&inputs(&[(0.0, 60.0), (30.0, 90.0), (600.0, 660.0)]), &config).unwrap();
        assert_eq!(
            geometry(&day),
            vec![(396.0, 0.0), (396.0, 400.0), (796.0, 0.0)]
        );
    }

    #[test]
    fn test_invalid_interval_aborts_before_placement() {
        let err = layout(
            &inputs(&[(0.0, 60.0), (90.0, 30.0)]),
            &LayoutConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidInterval {
                id: 1,
                start: 90.0,
                end: 30.0
            }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig::default().with_total_width(-1.0);
        let err = layout(&inputs(&[(0.0, 60.0)]), &config).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)), "got: {err}");
    }

    #[test]
    fn test_repeated_runs_do_not_share_state() {
        let events = inputs(&[(30.0, 150.0), (540.0, 600.0), (560.0, 620.0), (610.0, 670.0)]);
        let first = layout(&events, &LayoutConfig::default()).unwrap();
        let second = layout(&events.clone(), &LayoutConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.events[0].id, 0);
    }

    #[test]
    fn test_start_time_order_uses_fewer_columns() {
        let events = inputs(&[(0.0, 10.0), (5.0, 15.0), (20.0, 30.0), (12.0, 22.0)]);

        let as_given = layout(&events, &LayoutConfig::default()).unwrap();
        assert_eq!(as_given.column_count, 3);

        let sorted = layout(
            &events,
            &LayoutConfig::default().with_order(EventOrder::StartTime),
        )
        .unwrap();
        assert_eq!(sorted.column_count, 2);
        // Ids still follow input order.
        assert_eq!(
            sorted.events.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            sorted.events.iter().map(|e| e.column).collect::<Vec<_>>(),
            vec![0, 1, 1, 0]
        );
    }

    #[test]
    fn test_component_strategy() {
        let events = inputs(&[
            (0.0, 100.0),
            (0.0, 100.0),
            (0.0, 100.0),
            (0.0, 100.0),
            (200.0, 300.0),
            (250.0, 350.0),
            (320.0, 400.0),
        ]);
        let config = LayoutConfig::default().with_reflow(ReflowStrategy::Component);
        let day = layout(&events, &config).unwrap();
        assert_eq!(day.column_count, 4);
        assert_eq!(
            &geometry(&day)[4..],
            &[(297.0, 0.0), (297.0, 300.0), (297.0, 0.0)]
        );
    }

    #[test]
    fn test_state_exposes_stage_results() {
        let events = inputs(&[(0.0, 60.0), (30.0, 90.0)]);
        let state = LayoutState::new(&events, LayoutConfig::default()).run();
        assert_eq!(state.columns().len(), 2);
        assert!(state.overlap().collides(0, 1));
        let day = state.finish();
        assert_eq!(day.len(), 2);
    }

    #[test]
    fn test_layout_json_round_trip_shape() {
        let json = layout_json(
            r#"[{"start": 0, "end": 60}, {"start": 30, "end": 90}]"#,
            &LayoutConfig::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["columnCount"], 2);
        assert_eq!(value["events"][1]["marginLeft"], 300.0);
        assert_eq!(value["events"][1]["width"], 297.0);
        assert_eq!(value["events"][1]["column"], 1);
    }

    #[test]
    fn test_layout_json_rejects_malformed_events() {
        let err = layout_json(r#"[{"start": 0}]"#, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidJson(_)), "got: {err}");
    }
}
