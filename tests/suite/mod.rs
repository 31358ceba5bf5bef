mod deploy;
mod stopwatch;
