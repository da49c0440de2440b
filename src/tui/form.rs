// Settings form model: per-field text buffers, dirty tracking, and the
// coercion pass that turns buffers back into typed league settings on
// submit.
//
// Every field is edited as text and coerced only when the form is
// submitted. A fresh authoritative settings push refreshes the buffers
// only while the form is clean; once the user has typed, their edits hold
// until submit or explicit revert.

use crate::protocol::LeagueSettings;

/// Identity of each editable field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    SalaryCap,
    MinPayroll,
    LuxuryPayroll,
    LuxuryTax,
    MinContract,
    MaxContract,
    MinRosterSize,
    MaxRosterSize,
    NumGames,
    QuarterLength,
    InjuryRate,
    TragicDeathRate,
    NumGamesPlayoffSeries,
    NumPlayoffByes,
    NumSeasonsFutureDraftPicks,
    DisableInjuries,
    AiTrades,
    HardCap,
    PlayersRefuseToNegotiate,
    Budget,
}

/// Field display order.
pub const FIELD_ORDER: [FieldId; 20] = [
    FieldId::SalaryCap,
    FieldId::MinPayroll,
    FieldId::LuxuryPayroll,
    FieldId::LuxuryTax,
    FieldId::MinContract,
    FieldId::MaxContract,
    FieldId::MinRosterSize,
    FieldId::MaxRosterSize,
    FieldId::NumGames,
    FieldId::QuarterLength,
    FieldId::InjuryRate,
    FieldId::TragicDeathRate,
    FieldId::NumGamesPlayoffSeries,
    FieldId::NumPlayoffByes,
    FieldId::NumSeasonsFutureDraftPicks,
    FieldId::DisableInjuries,
    FieldId::AiTrades,
    FieldId::HardCap,
    FieldId::PlayersRefuseToNegotiate,
    FieldId::Budget,
];

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::SalaryCap => "Salary Cap ($K)",
            FieldId::MinPayroll => "Minimum Payroll ($K)",
            FieldId::LuxuryPayroll => "Luxury Tax Threshold ($K)",
            FieldId::LuxuryTax => "Luxury Tax Rate",
            FieldId::MinContract => "Minimum Contract ($K)",
            FieldId::MaxContract => "Maximum Contract ($K)",
            FieldId::MinRosterSize => "Minimum Roster Size",
            FieldId::MaxRosterSize => "Maximum Roster Size",
            FieldId::NumGames => "Games per Season",
            FieldId::QuarterLength => "Quarter Length (minutes)",
            FieldId::InjuryRate => "Injury Rate",
            FieldId::TragicDeathRate => "Tragic Death Rate",
            FieldId::NumGamesPlayoffSeries => "Playoff Games per Round",
            FieldId::NumPlayoffByes => "Playoff Byes",
            FieldId::NumSeasonsFutureDraftPicks => "Seasons of Future Draft Picks",
            FieldId::DisableInjuries => "Disable Injuries",
            FieldId::AiTrades => "AI-to-AI Trades",
            FieldId::HardCap => "Hard Cap",
            FieldId::PlayersRefuseToNegotiate => "Players Can Refuse to Negotiate",
            FieldId::Budget => "Budget Management",
        }
    }

    /// Whether the field holds a boolean (rendered/edited as true/false).
    pub fn is_bool(self) -> bool {
        matches!(
            self,
            FieldId::DisableInjuries
                | FieldId::AiTrades
                | FieldId::HardCap
                | FieldId::PlayersRefuseToNegotiate
                | FieldId::Budget
        )
    }

    fn buffer_from(self, s: &LeagueSettings) -> String {
        match self {
            FieldId::SalaryCap => s.salary_cap.to_string(),
            FieldId::MinPayroll => s.min_payroll.to_string(),
            FieldId::LuxuryPayroll => s.luxury_payroll.to_string(),
            FieldId::LuxuryTax => s.luxury_tax.to_string(),
            FieldId::MinContract => s.min_contract.to_string(),
            FieldId::MaxContract => s.max_contract.to_string(),
            FieldId::MinRosterSize => s.min_roster_size.to_string(),
            FieldId::MaxRosterSize => s.max_roster_size.to_string(),
            FieldId::NumGames => s.num_games.to_string(),
            FieldId::QuarterLength => s.quarter_length.to_string(),
            FieldId::InjuryRate => s.injury_rate.to_string(),
            FieldId::TragicDeathRate => s.tragic_death_rate.to_string(),
            FieldId::NumGamesPlayoffSeries => {
                serde_json::to_string(&s.num_games_playoff_series).unwrap_or_default()
            }
            FieldId::NumPlayoffByes => s.num_playoff_byes.to_string(),
            FieldId::NumSeasonsFutureDraftPicks => s.num_seasons_future_draft_picks.to_string(),
            FieldId::DisableInjuries => s.disable_injuries.to_string(),
            FieldId::AiTrades => s.ai_trades.to_string(),
            FieldId::HardCap => s.hard_cap.to_string(),
            FieldId::PlayersRefuseToNegotiate => s.players_refuse_to_negotiate.to_string(),
            FieldId::Budget => s.budget.to_string(),
        }
    }
}

/// The settings form: one text buffer per field plus edit bookkeeping.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    buffers: Vec<String>,
    pub cursor: usize,
    pub editing: bool,
    pub dirty: bool,
    /// Last submit error, shown until the next submit or edit.
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn new(settings: &LeagueSettings) -> SettingsForm {
        SettingsForm {
            buffers: FIELD_ORDER.iter().map(|f| f.buffer_from(settings)).collect(),
            cursor: 0,
            editing: false,
            dirty: false,
            error: None,
        }
    }

    pub fn buffer(&self, field: FieldId) -> &str {
        let i = FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(0);
        &self.buffers[i]
    }

    pub fn buffer_at(&self, index: usize) -> &str {
        &self.buffers[index]
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Refresh buffers from a fresh authoritative push -- only while the
    /// user has no unsubmitted edits.
    pub fn refresh(&mut self, settings: &LeagueSettings) {
        if self.dirty {
            return;
        }
        self.buffers = FIELD_ORDER.iter().map(|f| f.buffer_from(settings)).collect();
    }

    /// Discard edits and reload from the given settings.
    pub fn revert(&mut self, settings: &LeagueSettings) {
        self.dirty = false;
        self.editing = false;
        self.error = None;
        self.refresh(settings);
    }

    // -- editing ------------------------------------------------------------

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.buffers.len() {
            self.cursor += 1;
        }
    }

    pub fn current_field(&self) -> FieldId {
        FIELD_ORDER[self.cursor]
    }

    /// Begin editing the selected field. Boolean fields flip in place
    /// instead of entering text-edit mode.
    pub fn activate(&mut self) {
        let field = self.current_field();
        if field.is_bool() {
            let flipped = self.buffers[self.cursor] != "true";
            self.buffers[self.cursor] = flipped.to_string();
            self.dirty = true;
        } else {
            self.editing = true;
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.editing {
            self.buffers[self.cursor].push(c);
            self.dirty = true;
        }
    }

    pub fn pop_char(&mut self) {
        if self.editing {
            self.buffers[self.cursor].pop();
            self.dirty = true;
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    // -- submit -------------------------------------------------------------

    /// Coerce all buffers into typed settings.
    ///
    /// Mirrors the lenient coercion the page has always had: playoff byes
    /// below zero or unparseable become 0, unparseable future-picks
    /// seasons become 4. The playoff series list is strict: it must be a
    /// JSON array of integers, and `2^rounds - byes` may not exceed the
    /// league's team count.
    pub fn submit(&mut self, num_teams: u32) -> Result<LeagueSettings, String> {
        let result = self.coerce(num_teams);
        match &result {
            Ok(_) => {
                self.dirty = false;
                self.editing = false;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.clone());
            }
        }
        result
    }

    fn coerce(&self, num_teams: u32) -> Result<LeagueSettings, String> {
        let num_playoff_byes = self
            .buffer(FieldId::NumPlayoffByes)
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .unwrap_or(0) as u32;

        let series_text = self.buffer(FieldId::NumGamesPlayoffSeries).trim();
        let num_games_playoff_series: Vec<u32> = serde_json::from_str(series_text)
            .map_err(|_| "Invalid format for Playoff Games: must be a list of integers, e.g. [1, 1, 1, 1]".to_string())?;
        let num_rounds = num_games_playoff_series.len() as u32;
        let num_playoff_teams = 2u64.pow(num_rounds).saturating_sub(num_playoff_byes as u64);
        if num_playoff_teams > num_teams as u64 {
            return Err(format!(
                "{num_rounds} playoff rounds with {num_playoff_byes} byes means {num_playoff_teams} teams make the playoffs, but there are only {num_teams} teams in the league"
            ));
        }

        let num_seasons_future_draft_picks = self
            .buffer(FieldId::NumSeasonsFutureDraftPicks)
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .unwrap_or(4) as u32;

        Ok(LeagueSettings {
            salary_cap: self.parse_uint(FieldId::SalaryCap)?,
            min_payroll: self.parse_uint(FieldId::MinPayroll)?,
            luxury_payroll: self.parse_uint(FieldId::LuxuryPayroll)?,
            luxury_tax: self.parse_float(FieldId::LuxuryTax)?,
            min_contract: self.parse_uint(FieldId::MinContract)?,
            max_contract: self.parse_uint(FieldId::MaxContract)?,
            min_roster_size: self.parse_uint(FieldId::MinRosterSize)?,
            max_roster_size: self.parse_uint(FieldId::MaxRosterSize)?,
            num_games: self.parse_uint(FieldId::NumGames)?,
            quarter_length: self.parse_float(FieldId::QuarterLength)?,
            injury_rate: self.parse_float(FieldId::InjuryRate)?,
            tragic_death_rate: self.parse_float(FieldId::TragicDeathRate)?,
            num_playoff_byes,
            num_seasons_future_draft_picks,
            num_games_playoff_series,
            disable_injuries: self.parse_bool(FieldId::DisableInjuries),
            ai_trades: self.parse_bool(FieldId::AiTrades),
            hard_cap: self.parse_bool(FieldId::HardCap),
            players_refuse_to_negotiate: self.parse_bool(FieldId::PlayersRefuseToNegotiate),
            budget: self.parse_bool(FieldId::Budget),
        })
    }

    fn parse_uint(&self, field: FieldId) -> Result<u32, String> {
        self.buffer(field)
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid value for {}", field.label()))
    }

    fn parse_float(&self, field: FieldId) -> Result<f64, String> {
        self.buffer(field)
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid value for {}", field.label()))
    }

    fn parse_bool(&self, field: FieldId) -> bool {
        self.buffer(field) == "true"
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        SettingsForm::new(&LeagueSettings::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_mirror_settings() {
        let settings = LeagueSettings::default();
        let form = SettingsForm::new(&settings);
        assert_eq!(form.buffer(FieldId::SalaryCap), "90000");
        assert_eq!(form.buffer(FieldId::NumGamesPlayoffSeries), "[1,1,1,1]");
        assert_eq!(form.buffer(FieldId::AiTrades), "true");
    }

    #[test]
    fn clean_form_refreshes_from_push() {
        let mut form = SettingsForm::default();
        let mut pushed = LeagueSettings::default();
        pushed.salary_cap = 123_456;
        form.refresh(&pushed);
        assert_eq!(form.buffer(FieldId::SalaryCap), "123456");
    }

    #[test]
    fn dirty_form_ignores_push() {
        let mut form = SettingsForm::default();
        form.cursor = 0; // SalaryCap
        form.activate();
        form.push_char('1');
        assert!(form.dirty);

        let mut pushed = LeagueSettings::default();
        pushed.salary_cap = 123_456;
        form.refresh(&pushed);
        assert_eq!(form.buffer(FieldId::SalaryCap), "900001");
    }

    #[test]
    fn submit_round_trips_defaults() {
        let settings = LeagueSettings::default();
        let mut form = SettingsForm::new(&settings);
        let out = form.submit(32).unwrap();
        assert_eq!(out, settings);
        assert!(!form.dirty);
    }

    #[test]
    fn submit_clears_dirty_on_success() {
        let mut form = SettingsForm::default();
        form.cursor = 0;
        form.activate();
        form.pop_char(); // 90000 -> 9000
        assert!(form.dirty);
        let out = form.submit(32).unwrap();
        assert_eq!(out.salary_cap, 9000);
        assert!(!form.dirty);
    }

    #[test]
    fn bool_field_flips_without_edit_mode() {
        let mut form = SettingsForm::default();
        form.cursor = FIELD_ORDER
            .iter()
            .position(|f| *f == FieldId::HardCap)
            .unwrap();
        assert_eq!(form.buffer(FieldId::HardCap), "false");
        form.activate();
        assert!(!form.editing);
        assert_eq!(form.buffer(FieldId::HardCap), "true");
        assert!(form.dirty);
    }

    #[test]
    fn malformed_playoff_series_rejected() {
        let mut form = SettingsForm::default();
        let idx = FIELD_ORDER
            .iter()
            .position(|f| *f == FieldId::NumGamesPlayoffSeries)
            .unwrap();
        form.cursor = idx;
        form.activate();
        form.push_char('x');
        let err = form.submit(32).unwrap_err();
        assert!(err.contains("Playoff Games"));
        assert_eq!(form.error.as_deref(), Some(err.as_str()));
        // Failed submit keeps the edits.
        assert!(form.dirty);
    }

    #[test]
    fn too_many_playoff_teams_rejected() {
        let mut form = SettingsForm::default();
        // 4 rounds, 0 byes -> 16 teams; a 12-team league can't seat them.
        let byes_idx = FIELD_ORDER
            .iter()
            .position(|f| *f == FieldId::NumPlayoffByes)
            .unwrap();
        form.buffers[byes_idx] = "0".to_string();
        let err = form.submit(12).unwrap_err();
        assert!(err.contains("only 12 teams"));
    }

    #[test]
    fn negative_byes_coerced_to_zero() {
        let mut form = SettingsForm::default();
        let byes_idx = FIELD_ORDER
            .iter()
            .position(|f| *f == FieldId::NumPlayoffByes)
            .unwrap();
        form.buffers[byes_idx] = "-3".to_string();
        let out = form.submit(32).unwrap();
        assert_eq!(out.num_playoff_byes, 0);
    }

    #[test]
    fn unparseable_future_picks_defaults_to_four() {
        let mut form = SettingsForm::default();
        let idx = FIELD_ORDER
            .iter()
            .position(|f| *f == FieldId::NumSeasonsFutureDraftPicks)
            .unwrap();
        form.buffers[idx] = "garbage".to_string();
        let out = form.submit(32).unwrap();
        assert_eq!(out.num_seasons_future_draft_picks, 4);
    }

    #[test]
    fn bad_numeric_field_names_itself() {
        let mut form = SettingsForm::default();
        form.buffers[0] = "not a number".to_string(); // SalaryCap
        let err = form.submit(32).unwrap_err();
        assert!(err.contains("Salary Cap"));
    }

    #[test]
    fn revert_reloads_and_clears_state() {
        let mut form = SettingsForm::default();
        form.cursor = 0;
        form.activate();
        form.push_char('9');
        form.error = Some("stale".into());
        form.revert(&LeagueSettings::default());
        assert!(!form.dirty);
        assert!(!form.editing);
        assert!(form.error.is_none());
        assert_eq!(form.buffer(FieldId::SalaryCap), "90000");
    }
}
