use crate::state::AcState;

// Line format understood by the controller firmware:
// <power 1|0>,<temperature>,<mode>,<fanSpeed>\n
pub fn command_line(state: &AcState) -> String {
    let power = if state.is_on { "1" } else { "0" };
    format!("{},{},{},{}\n", power, state.temperature, state.mode, state.fan_speed)
}
