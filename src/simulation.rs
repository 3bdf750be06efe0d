use crate::geometry::{injury_wedge, layered_tissue, seed_vessels};
use crate::grid::{DistanceField, InjuryMask, LabelGrid};
use crate::state::TissueState;
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regrowth_common::{
    CellLabel, ConfigError, DrawMode, LabelCounts, SimParams, SimulationConfig, StepStats, TissueBands,
    TransitionProbabilities,
};

/// What a driver frame did, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// The amputation was applied before this frame's step.
    InjuryApplied,
    /// A regular frame; `scar_count` is read before the step runs.
    Advanced { step: u32, scar_count: u32 },
}

/// Everything the transition rule looks at for one cell. All fields come from the
/// pre-step grid and the current step's random fields.
#[derive(Debug, Clone, Copy)]
pub struct CellContext {
    pub previous: CellLabel,
    pub distance: f64,
    pub injured: bool,
    pub has_living_neighbor: bool,
    pub near_vessel: bool,
    pub growth_roll: f64,
    pub vessel_roll: f64,
    pub necrosis_roll: f64,
    pub scar_roll: f64,
}

/// Applies regrowth, sprouting, necrosis and scarring to one cell, in that order.
/// Later rules overwrite earlier ones; the ring clamp is applied last.
#[inline(always)]
pub fn next_label(cell: &CellContext, bands: &TissueBands, p: &TransitionProbabilities) -> CellLabel {
    let mut next = cell.previous;
    let regrowable = cell.previous == CellLabel::Empty && cell.injured;

    // --- 1. Tissue Regrowth ---
    if regrowable && cell.has_living_neighbor && cell.growth_roll < p.tissue_growth {
        next = bands.classify(cell.distance);
    }

    // --- 2. Vessel Sprouting ---
    if regrowable && cell.near_vessel && cell.vessel_roll < p.vessel_growth {
        next = CellLabel::Vessel;
    }

    // --- 3. Necrosis ---
    if cell.previous == CellLabel::Muscle
        && cell.injured
        && !cell.near_vessel
        && cell.necrosis_roll < p.necrosis
    {
        next = CellLabel::Necrosis;
    }

    // --- 4. Scar Formation (sees necrosis from this same step) ---
    if next == CellLabel::Necrosis && cell.scar_roll < p.scar_formation {
        next = CellLabel::Scar;
    }

    if bands.is_outside(cell.distance) {
        next = CellLabel::Empty;
    }
    next
}

#[inline]
fn fill_uniform<R: Rng>(rng: &mut R, field: &mut [f64]) {
    for value in field.iter_mut() {
        *value = rng.random();
    }
}

/// Manages the state and execution of the regrowth automaton.
pub struct RegrowthSimulation<R: Rng = StdRng> {
    /// The configuration the simulation was built from.
    config: SimulationConfig,
    /// Grids, geometry and scratch fields.
    state: TissueState,
    /// Single source of randomness for seeding and every step.
    rng: R,
    /// Number of steps applied so far.
    current_step: u32,
    injured: bool,
    recorded_snapshots: Vec<StepStats>,
}

impl RegrowthSimulation<StdRng> {
    /// Builds the initial limb from `config`, seeding `StdRng` from `run.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let rng = StdRng::seed_from_u64(config.run.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> RegrowthSimulation<R> {
    /// Builds the initial limb from `config` using the given random source.
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.get_sim_params();

        let distances = DistanceField::from_center(params.grid_size, params.center);
        let mut grid = layered_tissue(&params, &distances);
        let seeded = seed_vessels(&mut grid, params.vessel_seed_probability, &mut rng);
        info!(
            "Initialized {}x{} limb: {} bone, {} muscle, {} skin, {} vessels seeded.",
            params.grid_size,
            params.grid_size,
            grid.count(CellLabel::Bone),
            grid.count(CellLabel::Muscle),
            grid.count(CellLabel::Skin),
            seeded
        );

        let injury_mask = InjuryMask::new(params.grid_size);
        let state = TissueState::new(params, grid, distances, injury_mask);

        Ok(Self {
            config,
            state,
            rng,
            current_step: 0,
            injured: false,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Starts from a caller-supplied grid and mask instead of the layered limb.
    /// Both must match `config.grid.size`.
    pub fn from_state(
        config: SimulationConfig,
        grid: LabelGrid,
        injury_mask: InjuryMask,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.get_sim_params();
        if grid.size() != params.grid_size || injury_mask.size() != params.grid_size {
            return Err(ConfigError::Invalid {
                name: "grid.size",
                reason: format!(
                    "supplied grid is {} and mask is {}, configuration expects {}",
                    grid.size(),
                    injury_mask.size(),
                    params.grid_size
                ),
            });
        }

        let injured = injury_mask.count() > 0;
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let state = TissueState::new(params, grid, distances, injury_mask);

        Ok(Self {
            config,
            state,
            rng,
            current_step: 0,
            injured,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Advances the automaton by one step.
    pub fn step(&mut self) {
        // --- 1. Neighborhood Fields ---
        self.state.update_neighborhood();

        // --- 2. Random Fields ---
        self.roll_dice();

        // --- 3. Transition Rules ---
        self.apply_transitions();

        // --- Swap Buffers: Output becomes Input for next step ---
        self.state.swap_buffers();

        self.current_step += 1;
        trace!("Step {} applied.", self.current_step);
    }

    /// Draws this step's random fields. The number of draws depends only on the grid
    /// size and draw mode, never on the grid contents.
    fn roll_dice(&mut self) {
        let state = &mut self.state;
        fill_uniform(&mut self.rng, &mut state.growth_dice);
        if state.params.draw_mode == DrawMode::Independent {
            fill_uniform(&mut self.rng, &mut state.vessel_dice);
        }
        fill_uniform(&mut self.rng, &mut state.necrosis_dice);
        fill_uniform(&mut self.rng, &mut state.scar_dice);
    }

    /// Writes the next label of every cell into `grid_out`, reading only `grid_in`.
    fn apply_transitions(&mut self) {
        let state = &mut self.state;
        let bands = state.params.bands;
        let probabilities = state.params.probabilities;
        let vessel_dice = match state.params.draw_mode {
            DrawMode::Shared => &state.growth_dice,
            DrawMode::Independent => &state.vessel_dice,
        };
        let previous = state.grid_in.as_slice();

        for (idx, out) in state.grid_out.as_mut_slice().iter_mut().enumerate() {
            let cell = CellContext {
                previous: previous[idx],
                distance: state.distances.get(idx),
                injured: state.injury_mask.is_set(idx),
                has_living_neighbor: state.has_living_neighbor[idx],
                near_vessel: state.near_vessel[idx],
                growth_roll: state.growth_dice[idx],
                vessel_roll: vessel_dice[idx],
                necrosis_roll: state.necrosis_dice[idx],
                scar_roll: state.scar_dice[idx],
            };
            *out = next_label(&cell, &bands, &probabilities);
        }
    }

    /// Cuts the amputation wedge: clears it to `Empty` and adds it to the injury mask.
    /// Returns the number of cells newly added to the mask.
    pub fn trigger_injury(&mut self) -> u32 {
        if self.injured {
            warn!("Injury triggered again at step {}; the wedge is already cut.", self.current_step);
        }

        let wedge = injury_wedge(&self.state.params, &self.state.distances);
        let cells = self.state.grid_in.as_mut_slice();
        let mut newly_masked = 0;
        for &idx in &wedge {
            cells[idx] = CellLabel::Empty;
            if self.state.injury_mask.mark(idx) {
                newly_masked += 1;
            }
        }
        self.injured = true;

        info!(
            "Injury applied at step {}: {} cells cut ({} newly masked).",
            self.current_step,
            wedge.len(),
            newly_masked
        );
        newly_masked
    }

    /// One driver frame: cuts the wedge if this is the injury step, then steps.
    pub fn tick(&mut self) -> FrameEvent {
        let event = if self.current_step == self.state.params.injury_step && !self.injured {
            self.trigger_injury();
            FrameEvent::InjuryApplied
        } else {
            FrameEvent::Advanced { step: self.current_step, scar_count: self.scar_count() }
        };
        self.step();
        event
    }

    /// Appends summary statistics of the current grid to the recorded list.
    pub fn record_snapshot(&mut self) {
        let snapshot = StepStats {
            step: self.current_step,
            injured: self.injured,
            injured_cell_count: self.injured_cell_count(),
            counts: self.label_counts(),
        };
        debug!(
            "Snapshot at step {}: scar={}, necrosis={}, vessel={}",
            snapshot.step, snapshot.counts.scar, snapshot.counts.necrosis, snapshot.counts.vessel
        );
        self.recorded_snapshots.push(snapshot);
    }

    /// Provides access to the recorded snapshots.
    pub fn recorded_snapshots(&self) -> &[StepStats] {
        &self.recorded_snapshots
    }

    /// The current grid, read-only.
    pub fn grid(&self) -> &LabelGrid {
        &self.state.grid_in
    }

    pub fn injury_mask(&self) -> &InjuryMask {
        &self.state.injury_mask
    }

    pub fn distance_field(&self) -> &DistanceField {
        &self.state.distances
    }

    pub fn count(&self, label: CellLabel) -> u32 {
        self.state.grid_in.count(label)
    }

    pub fn scar_count(&self) -> u32 {
        self.count(CellLabel::Scar)
    }

    /// Cells currently inside the injury mask.
    pub fn injured_cell_count(&self) -> u32 {
        self.state.injury_mask.count()
    }

    pub fn label_counts(&self) -> LabelCounts {
        LabelCounts::tally(self.state.grid_in.as_slice())
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn is_injured(&self) -> bool {
        self.injured
    }

    /// True once the configured number of steps has run.
    pub fn is_finished(&self) -> bool {
        self.current_step >= self.state.params.total_steps
    }

    pub fn params(&self) -> &SimParams {
        &self.state.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
