use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::str::FromStr;
use timeslice_sched::{Algorithm, Scheduler};

#[derive(Parser)]
#[command(author, version, about = "Educational CPU/IO scheduling simulator", long_about = None)]
struct Cli {
    /// Preselect the scheduling algorithm
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Preemption quantum in milliseconds
    #[arg(long)]
    quantum: Option<u64>,

    /// Create this many random threads before showing the menu
    #[arg(long, default_value_t = 0)]
    random: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum AlgorithmArg {
    RoundRobin,
    Priority,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::RoundRobin => Algorithm::RoundRobin,
            AlgorithmArg::Priority => Algorithm::Priority,
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut scheduler = Scheduler::new();
    if let Some(algorithm) = cli.algorithm {
        scheduler.choose_algorithm(algorithm.into());
    }
    if let Some(quantum) = cli.quantum {
        scheduler.select_quantum(quantum);
    }
    if cli.random > 0 {
        scheduler.create_random_threads(cli.random);
        println!("Created {} random threads.", cli.random);
    }

    menu_loop(&mut scheduler)
}

fn menu_loop(scheduler: &mut Scheduler) -> io::Result<()> {
    loop {
        println!();
        println!("Menu:");
        println!("1. Create thread");
        println!("2. Choose scheduling algorithm");
        println!("3. Select quantum");
        println!("4. Show ready queue");
        println!("5. Run the simulation");
        println!("6. Create random threads");
        println!("7. Quit");

        let choice = prompt("Option: ")?;
        match choice.trim() {
            "1" => create_thread(scheduler)?,
            "2" => choose_algorithm(scheduler)?,
            "3" => {
                if let Some(quantum) = read_number::<u64>("Quantum in milliseconds (1-10): ")? {
                    scheduler.select_quantum(quantum);
                }
            }
            "4" => scheduler.print_ready_queue(),
            "5" => match scheduler.run_simulation() {
                Ok(average) => println!("Average turnaround time: {average:.2} ms"),
                Err(err) => println!("{err}"),
            },
            "6" => {
                if let Some(count) = read_number::<usize>("Number of threads to create: ")? {
                    scheduler.create_random_threads(count);
                    println!("Created {count} random threads.");
                }
            }
            "7" => {
                println!("Bye.");
                return Ok(());
            }
            other => println!("Invalid option: {other}"),
        }
    }
}

fn create_thread(scheduler: &mut Scheduler) -> io::Result<()> {
    let name = prompt("Thread name: ")?;
    let name = name.trim();
    let Some(priority) = read_number::<u32>("Priority (higher runs first): ")? else {
        return Ok(());
    };
    let answer = prompt("Is the thread I/O bound (y/N)? ")?;
    let io_bound = matches!(answer.trim(), "y" | "Y" | "yes");
    let Some(total_cpu) = read_number::<u64>("Total CPU time in ms: ")? else {
        return Ok(());
    };
    let Some(total_io) = read_number::<u64>("Total IO time in ms: ")? else {
        return Ok(());
    };

    let id = scheduler.create_thread(name, priority, io_bound, total_cpu, total_io);
    println!("Created thread {id} ({name}).");
    Ok(())
}

fn choose_algorithm(scheduler: &mut Scheduler) -> io::Result<()> {
    println!("1. Round Robin");
    println!("2. Priority");
    let choice = prompt("Option: ")?;
    let algorithm = match choice.trim() {
        "1" => Algorithm::RoundRobin,
        "2" => Algorithm::Priority,
        other => {
            println!("Invalid option: {other}");
            return Ok(());
        }
    };
    scheduler.choose_algorithm(algorithm);
    println!("Selected {}.", algorithm.label());
    Ok(())
}

fn prompt(text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Reads one number from stdin; a value that does not parse is reported
/// and `None` returned so the menu can move on.
fn read_number<T: FromStr>(text: &str) -> io::Result<Option<T>> {
    let raw = prompt(text)?;
    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Not a valid number: {}", raw.trim());
            Ok(None)
        }
    }
}
