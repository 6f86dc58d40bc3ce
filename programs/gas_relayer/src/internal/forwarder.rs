use anchor_lang::{
    prelude::*,
    solana_program::{
        instruction::{AccountMeta, Instruction},
        program::{get_return_data, invoke, set_return_data},
    },
};

/// Prepends the configured selector so only calls shaped for that one
/// entrypoint can be relayed.
pub fn build_call_data(method: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(method.len() + payload.len());
    data.extend_from_slice(method);
    data.extend_from_slice(payload);
    data
}

pub fn build_call(program_id: Pubkey, accounts: &[AccountInfo], data: Vec<u8>) -> Instruction {
    Instruction {
        program_id,
        accounts: accounts
            .iter()
            .map(|account| AccountMeta {
                pubkey: account.key(),
                is_signer: account.is_signer,
                is_writable: account.is_writable,
            })
            .collect(),
        data,
    }
}

/// Executes `method ++ payload` against the target program. The call carries
/// no program signature: the relay never lends its delegate authority to the
/// target.
pub fn forward_call<'info>(
    target_program: &AccountInfo<'info>,
    accounts: &[AccountInfo<'info>],
    method: &[u8; 4],
    payload: &[u8],
) -> Result<()> {
    let ix = build_call(
        target_program.key(),
        accounts,
        build_call_data(method, payload),
    );

    let mut account_infos = accounts.to_vec();
    account_infos.push(target_program.clone());

    set_return_data(&[]);
    invoke(&ix, &account_infos).map_err(|e| {
        msg!("Forwarded call errored: {:?}", e);
        ForwarderError::CallFailed
    })?;

    if let Some((program_id, data)) = get_return_data() {
        if program_id == target_program.key() && !call_succeeded(&data) {
            msg!("Target {} reported failure", program_id);
            return err!(ForwarderError::CallFailed);
        }
    }

    Ok(())
}

/// Targets may report failure without erroring by returning a Borsh `false`.
pub fn call_succeeded(return_data: &[u8]) -> bool {
    !matches!(return_data, [0])
}

#[error_code(offset = 6200)]
pub enum ForwarderError {
    #[msg("Could not successfully call target")]
    CallFailed,
    #[msg("Target program must be the executable owner of the target account")]
    InvalidTargetProgram,
    #[msg("Relay is already in progress")]
    ReentrantCall,
}
