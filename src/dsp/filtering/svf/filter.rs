use super::*;

#[derive(Clone, Default, Debug)]
struct SVFCoefs {
    g: f64,
    h: f64,
    r2: f64,
}

/// TPT state variable filter with per-channel state.
#[derive(Clone, Debug)]
pub struct StateVariableFilter {
    coefs: SVFCoefs,

    z1: Vec<f64>,
    z2: Vec<f64>,

    cutoff_freq: f64,
    q: f64,

    filter_type: FilterType,

    sample_rate: f64,
}

impl StateVariableFilter {
    /// Creates a lowpass filter at 440 Hz with a Butterworth Q.
    pub fn new(num_channels: usize, sample_rate: f64) -> Self {
        let mut filter = Self {
            coefs: SVFCoefs::default(),
            z1: vec![0.0; num_channels],
            z2: vec![0.0; num_channels],
            cutoff_freq: 440.0_f64.min(sample_rate * 0.49),
            q: BUTTERWORTH_Q,
            filter_type: FilterType::Lowpass,
            sample_rate,
        };
        filter.update();
        filter
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    /// # Panics
    ///
    /// Panics if `freq` is negative or above the Nyquist frequency.
    pub fn set_cutoff_freq(&mut self, freq: f64) {
        assert!(freq.is_sign_positive() && freq <= self.sample_rate / 2.0);
        self.cutoff_freq = freq;
        self.update();
    }

    pub fn cutoff_freq(&self) -> f64 {
        self.cutoff_freq
    }

    /// Filters one sample on channel `ch`, returning the
    /// `(low, band, high)` outputs.
    #[inline]
    fn tick(&mut self, input: f64, ch: usize) -> (f64, f64, f64) {
        let SVFCoefs { g, h, r2 } = self.coefs;
        let ls_1 = self.z1[ch];
        let ls_2 = self.z2[ch];

        let high = h * (input - ls_1 * (g + r2) - ls_2);

        let band = high * g + ls_1;
        self.z1[ch] = high * g + band;

        let low = band * g + ls_2;
        self.z2[ch] = band * g + low;

        (low, band, high)
    }

    fn select(&self, (low, band, high): (f64, f64, f64)) -> f64 {
        match self.filter_type {
            FilterType::Lowpass => low,
            FilterType::Highpass => high,
            FilterType::Bandpass => band,
        }
    }

    fn update(&mut self) {
        let SVFCoefs { g, h, r2 } = &mut self.coefs;

        *g = (PI * self.cutoff_freq / self.sample_rate).tan();
        *r2 = self.q.recip();
        *h = (1.0 + *r2 * *g + *g * *g).recip();
    }
}

impl Effect for StateVariableFilter {
    fn process_mono(&mut self, input: f64, ch_idx: usize) -> f64 {
        if ch_idx >= self.z1.len() {
            return input;
        }

        let out = self.tick(input, ch_idx);
        self.select(out)
    }

    fn process_stereo(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        (self.process_mono(in_l, 0), self.process_mono(in_r, 1))
    }

    fn get_sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn get_identifier(&self) -> &str {
        "state_variable_filter"
    }
}
