pub mod fourier;
