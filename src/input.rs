use macroquad::input::{KeyCode, is_key_down};

/// Controls a player tank polls once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Fire,
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
    TurretLeft,
    TurretRight,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Fire,
        Control::RotateLeft,
        Control::RotateRight,
        Control::MoveForward,
        Control::MoveBackward,
        Control::TurretLeft,
        Control::TurretRight,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn key(self) -> KeyCode {
        match self {
            Control::Fire => KeyCode::Space,
            Control::RotateLeft => KeyCode::A,
            Control::RotateRight => KeyCode::D,
            Control::MoveForward => KeyCode::W,
            Control::MoveBackward => KeyCode::S,
            Control::TurretLeft => KeyCode::J,
            Control::TurretRight => KeyCode::K,
        }
    }
}

/// Level-triggered control state.
pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
}

/// Fixed set of held controls, for scripted or captured input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    held: u8,
}

impl ControlState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, control: Control) -> Self {
        self.press(control);
        self
    }

    pub fn press(&mut self, control: Control) {
        self.held |= control.bit();
    }

    pub fn release(&mut self, control: Control) {
        self.held &= !control.bit();
    }

    /// Captures the current keyboard state.
    pub fn from_source(source: &dyn InputSource) -> Self {
        Control::ALL
            .iter()
            .filter(|control| source.is_held(**control))
            .fold(Self::none(), |state, control| state.with(*control))
    }
}

impl InputSource for ControlState {
    fn is_held(&self, control: Control) -> bool {
        self.held & control.bit() != 0
    }
}

/// Reads controls straight from the macroquad keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn is_held(&self, control: Control) -> bool {
        is_key_down(control.key())
    }
}
