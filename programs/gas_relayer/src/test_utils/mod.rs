use anchor_lang::{
    prelude::*,
    solana_program::{
        instruction::Instruction, native_token::LAMPORTS_PER_SOL, system_instruction,
    },
    system_program, InstructionData,
};
use anchor_spl::{
    token::{spl_token, Mint, TokenAccount},
    token_2022::spl_token_2022::{
        self,
        extension::{
            transfer_fee::instruction::initialize_transfer_fee_config, BaseStateWithExtensions,
            ExtensionType, StateWithExtensions,
        },
    },
    token_interface,
};
use litesvm::{types::TransactionResult, LiteSVM};
use solana_keypair::Keypair;
use solana_message::Message;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::{
    accounts,
    constants::{compute_budget_program, CONFIG_SEED},
    instruction,
    state::RelaySettings,
    ID,
};

pub const TEST_METHOD: [u8; 4] = [0x6a, 0x76, 0x12, 0x02];
pub const TEST_MAX_PRIORITY_FEE: u64 = 1_000_000_000;
pub const TEST_DECIMALS: u8 = 9;

/// Loads both programs built by `anchor build`.
pub fn load_programs(svm: &mut LiteSVM) {
    svm.add_program_from_file(ID, "../../target/deploy/gas_relayer.so")
        .unwrap();
    svm.add_program_from_file(example_wallet::ID, "../../target/deploy/example_wallet.so")
        .unwrap();
}

pub fn config_pda(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED, owner.as_ref()], &ID)
}

pub fn test_settings(token: Pubkey) -> RelaySettings {
    RelaySettings {
        token,
        max_priority_fee: TEST_MAX_PRIORITY_FEE,
        relayer_fee: 0,
        method: TEST_METHOD,
    }
}

pub fn send(
    svm: &mut LiteSVM,
    payer: &Keypair,
    signers: &[&Keypair],
    ixs: &[Instruction],
) -> TransactionResult {
    let mut all_signers = vec![payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new(
        all_signers.as_slice(),
        Message::new(ixs, Some(&payer.pubkey())),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

/// Creates a funded owner and its uninitialized relay instance.
pub fn create_relayer(svm: &mut LiteSVM) -> (Keypair, Pubkey) {
    let owner = Keypair::new();
    svm.airdrop(&owner.pubkey(), LAMPORTS_PER_SOL * 10).unwrap();
    let (config, _) = config_pda(&owner.pubkey());

    let ix = Instruction {
        program_id: ID,
        accounts: accounts::Create {
            owner: owner.pubkey(),
            config,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::Create {}.data(),
    };
    send(svm, &owner, &[], &[ix]).unwrap();

    (owner, config)
}

pub fn initialize_ix(config: Pubkey, settings: RelaySettings) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::Initialize { config }.to_account_metas(None),
        data: instruction::Initialize {
            token: settings.token,
            max_priority_fee: settings.max_priority_fee,
            relayer_fee: settings.relayer_fee,
            method: settings.method,
        }
        .data(),
    }
}

pub fn initialize_relayer(svm: &mut LiteSVM, payer: &Keypair, config: Pubkey, mint: Pubkey) {
    send(svm, payer, &[], &[initialize_ix(config, test_settings(mint))]).unwrap();
}

pub fn create_mint(svm: &mut LiteSVM, authority: &Keypair) -> Pubkey {
    let mint = Keypair::new();
    let rent = svm.minimum_balance_for_rent_exemption(Mint::LEN);

    let ixs = [
        system_instruction::create_account(
            &authority.pubkey(),
            &mint.pubkey(),
            rent,
            Mint::LEN as u64,
            &spl_token::ID,
        ),
        spl_token::instruction::initialize_mint2(
            &spl_token::ID,
            &mint.pubkey(),
            &authority.pubkey(),
            None,
            TEST_DECIMALS,
        )
        .unwrap(),
    ];
    send(svm, authority, &[&mint], &ixs).unwrap();

    mint.pubkey()
}

/// Creates a Token-2022 mint with the transfer fee extension. The fee is
/// withheld from every transfer, so recipients are credited less than sent.
pub fn create_transfer_fee_mint(svm: &mut LiteSVM, authority: &Keypair, basis_points: u16) -> Pubkey {
    let mint = Keypair::new();
    let len = ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&[
        ExtensionType::TransferFeeConfig,
    ])
    .unwrap();
    let rent = svm.minimum_balance_for_rent_exemption(len);

    let ixs = [
        system_instruction::create_account(
            &authority.pubkey(),
            &mint.pubkey(),
            rent,
            len as u64,
            &spl_token_2022::ID,
        ),
        initialize_transfer_fee_config(
            &spl_token_2022::ID,
            &mint.pubkey(),
            None,
            None,
            basis_points,
            u64::MAX,
        )
        .unwrap(),
        spl_token_2022::instruction::initialize_mint2(
            &spl_token_2022::ID,
            &mint.pubkey(),
            &authority.pubkey(),
            None,
            TEST_DECIMALS,
        )
        .unwrap(),
    ];
    send(svm, authority, &[&mint], &ixs).unwrap();

    mint.pubkey()
}

/// Creates a token account under whichever token program owns `mint`.
pub fn create_token_account(
    svm: &mut LiteSVM,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Pubkey {
    let mint_account = svm.get_account(mint).unwrap();
    let token_program = mint_account.owner;
    let len = if token_program == spl_token_2022::ID {
        let state =
            StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&mint_account.data).unwrap();
        let required = ExtensionType::get_required_init_account_extensions(
            &state.get_extension_types().unwrap(),
        );
        ExtensionType::try_calculate_account_len::<spl_token_2022::state::Account>(&required)
            .unwrap()
    } else {
        TokenAccount::LEN
    };

    let account = Keypair::new();
    let rent = svm.minimum_balance_for_rent_exemption(len);

    let ixs = [
        system_instruction::create_account(
            &payer.pubkey(),
            &account.pubkey(),
            rent,
            len as u64,
            &token_program,
        ),
        spl_token_2022::instruction::initialize_account3(
            &token_program,
            &account.pubkey(),
            mint,
            owner,
        )
        .unwrap(),
    ];
    send(svm, payer, &[&account], &ixs).unwrap();

    account.pubkey()
}

pub fn mint_to(
    svm: &mut LiteSVM,
    authority: &Keypair,
    mint: &Pubkey,
    account: &Pubkey,
    amount: u64,
) {
    let token_program = svm.get_account(mint).unwrap().owner;
    let ix = spl_token_2022::instruction::mint_to(
        &token_program,
        mint,
        account,
        &authority.pubkey(),
        &[],
        amount,
    )
    .unwrap();
    send(svm, authority, &[], &[ix]).unwrap();
}

pub fn token_account(svm: &LiteSVM, account: &Pubkey) -> token_interface::TokenAccount {
    let account = svm.get_account(account).unwrap();
    token_interface::TokenAccount::try_deserialize(&mut &account.data[..]).unwrap()
}

pub fn token_balance(svm: &LiteSVM, account: &Pubkey) -> u64 {
    token_account(svm, account).amount
}

pub fn lamports(svm: &LiteSVM, account: &Pubkey) -> u64 {
    svm.get_account(account).map(|a| a.lamports).unwrap_or(0)
}

pub fn set_compute_unit_limit_ix(units: u32) -> Instruction {
    let mut data = vec![2u8];
    data.extend_from_slice(&units.to_le_bytes());
    Instruction {
        program_id: compute_budget_program::ID,
        accounts: vec![],
        data,
    }
}

pub fn set_compute_unit_price_ix(micro_lamports: u64) -> Instruction {
    let mut data = vec![3u8];
    data.extend_from_slice(&micro_lamports.to_le_bytes());
    Instruction {
        program_id: compute_budget_program::ID,
        accounts: vec![],
        data,
    }
}

/// Asserts the transaction failed with the named Anchor error.
pub fn assert_anchor_error(result: TransactionResult, error_name: &str) {
    let failure = result.expect_err("transaction should have failed");
    let expected = format!("Error Code: {error_name}.");
    assert!(
        failure.meta.logs.iter().any(|log| log.contains(&expected)),
        "expected {error_name}, got {:?}\nlogs: {:#?}",
        failure.err,
        failure.meta.logs
    );
}

/// Asserts the transaction failed with `program`'s own custom error code,
/// passed through unchanged.
pub fn assert_program_error(result: TransactionResult, program: &Pubkey, code: u32) {
    let failure = result.expect_err("transaction should have failed");
    let expected = format!("Program {program} failed: custom program error: {code:#x}");
    assert!(
        failure.meta.logs.iter().any(|log| log.contains(&expected)),
        "expected {expected}, got {:?}\nlogs: {:#?}",
        failure.err,
        failure.meta.logs
    );
}
